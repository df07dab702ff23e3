//! Sundarkand player - headless demo
//!
//! Runs the player thread against a simulated media backend and logs the
//! highlighted lyric as the recitation plays. Set `RUST_LOG=debug` to see
//! every effect.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use sundarkand_player::lyrics::Dataset;
use sundarkand_player::player::{
    MediaIntent, PlayerEffect, PlayerEvent, PlayerHandle, spawn_player,
};
use sundarkand_player::settings::Settings;
use sundarkand_player::utils::format_progress;

const SAMPLE_DATASET: &str = include_str!("../demos/sundarkand_sample.json");

/// Wall-clock interval between media clock reports
const TICK: Duration = Duration::from_millis(100);

/// Media seconds played per tick
const MEDIA_SECONDS_PER_TICK: f64 = 5.0;

/// Safety stop for the demo loop
const MAX_TICKS: u64 = 600;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load();
    let dataset = load_dataset(&settings)?;
    let duration = dataset
        .lyrics()
        .last()
        .map(|l| l.time + 10.0)
        .unwrap_or(0.0);
    tracing::info!(
        "Loaded {} lyrics in {} outline sections",
        dataset.lyrics().len(),
        dataset.outline().len()
    );

    let mut player =
        spawn_player(dataset, settings.player_config()).map_err(anyhow::Error::msg)?;
    let mut effects = player
        .take_effect_rx()
        .context("Effect receiver already taken")?;
    let handle = player.handle.clone();

    handle.data_loading_started();
    handle.data_loaded(duration);

    let mut media = SimulatedMedia::new(duration);
    let mut ticker = tokio::time::interval(TICK);
    let mut last_lyric = None;
    let mut tick = 0u64;

    loop {
        tokio::select! {
            Some(effect) = effects.recv() => media.apply(&effect),
            _ = ticker.tick() => {
                tick += 1;
                media.tick(&handle);
                for event in scripted_events(tick) {
                    tracing::info!("Demo input: {}", event.name());
                    handle.send(event);
                }

                let snapshot = handle.snapshot();
                if snapshot.context.current_lyric_index != last_lyric {
                    last_lyric = snapshot.context.current_lyric_index;
                    if let Some(lyric) = snapshot.current_lyric() {
                        tracing::info!(
                            "[{}] {} | {} | {}",
                            format_progress(snapshot.display_position(), duration),
                            snapshot.current_outline_title().unwrap_or("-"),
                            lyric.kind.display_name(),
                            lyric.text
                        );
                    }
                }

                if media.finished() || tick >= MAX_TICKS {
                    break;
                }
            }
        }
    }

    tracing::info!("Demo finished after {} ticks", tick);
    player
        .join(Duration::from_secs(1))
        .map_err(anyhow::Error::msg)?;
    Ok(())
}

fn load_dataset(settings: &Settings) -> Result<Dataset> {
    match &settings.dataset_path {
        Some(path) => Dataset::load_from_file(path),
        None => Dataset::from_json_str(SAMPLE_DATASET).context("Bundled sample dataset is invalid"),
    }
}

/// User interaction replayed at fixed ticks
fn scripted_events(tick: u64) -> Vec<PlayerEvent> {
    match tick {
        8 => vec![PlayerEvent::Forward],
        9 => vec![PlayerEvent::Forward],
        12 => vec![PlayerEvent::Backward],
        15 => vec![PlayerEvent::ManualScroll],
        20 => vec![PlayerEvent::ClickLyric { index: 20 }],
        30 => vec![PlayerEvent::Pause],
        35 => vec![PlayerEvent::PlayAfterPause],
        40 => vec![PlayerEvent::Seek { position: 300.0 }],
        45 => vec![PlayerEvent::ToggleMute],
        48 => vec![
            PlayerEvent::ToggleMute,
            PlayerEvent::ChangeVolume { volume: 0.6 },
        ],
        55 => vec![PlayerEvent::ClickOutline { index: 14 }],
        60 => vec![PlayerEvent::Seek { position: 9_999.0 }],
        _ => Vec::new(),
    }
}

/// Stand-in for a real audio backend
///
/// Advances its clock while playing, reports it as `time_update`, and
/// answers seek intents one tick later.
#[derive(Debug)]
struct SimulatedMedia {
    duration: f64,
    position: f64,
    playing: bool,
    pending_seek: Option<f64>,
}

impl SimulatedMedia {
    fn new(duration: f64) -> Self {
        Self {
            duration,
            position: 0.0,
            playing: false,
            pending_seek: None,
        }
    }

    fn finished(&self) -> bool {
        self.position >= self.duration
    }

    fn apply(&mut self, effect: &PlayerEffect) {
        match effect {
            PlayerEffect::Media(MediaIntent::Play) => self.playing = true,
            PlayerEffect::Media(MediaIntent::Pause) => self.playing = false,
            PlayerEffect::Media(MediaIntent::Seek { position }) => {
                self.pending_seek = Some(*position);
            }
            PlayerEffect::ShowToast { direction } => {
                tracing::info!("Toast: {}", direction.message());
            }
            PlayerEffect::ManualScrollChanged { active } => {
                tracing::info!("Manual scrolling: {}", active);
            }
            other => tracing::debug!("Effect: {:?}", other),
        }
    }

    fn tick(&mut self, handle: &PlayerHandle) {
        if let Some(target) = self.pending_seek.take() {
            if (0.0..=self.duration).contains(&target) {
                self.position = target;
                handle.seek_complete();
            } else {
                tracing::warn!("Seek to {:.1}s is past the end", target);
                handle.seek_failed();
            }
        }

        if self.playing {
            self.position = (self.position + MEDIA_SECONDS_PER_TICK).min(self.duration);
            handle.time_update(self.position);
        }
    }
}
