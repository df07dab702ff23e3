//! Player thread implementation
//!
//! Runs the `PlayerOrchestrator` on a dedicated thread with a single-threaded
//! tokio runtime. The orchestrator's virtual clock is pinned to the instant
//! the thread started, so timers fire against real time here while tests can
//! drive the orchestrator directly.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use tokio::time::Instant;

use super::events::{
    PlayerCommand, PlayerCommandReceiver, PlayerEffectReceiver, PlayerEffectSender,
    player_command_channel, player_effect_channel,
};
use super::handle::PlayerHandle;
use super::orchestrator::{PlayerConfig, PlayerOrchestrator};
use super::snapshot::SharedPlayerState;
use crate::lyrics::Dataset;

pub struct PlayerThreadHandle {
    pub handle: PlayerHandle,
    pub effect_rx: Option<PlayerEffectReceiver>,
    thread_handle: Option<JoinHandle<()>>,
}

impl PlayerThreadHandle {
    pub fn take_effect_rx(&mut self) -> Option<PlayerEffectReceiver> {
        self.effect_rx.take()
    }

    /// Shut the thread down and wait up to `timeout` for it to exit
    pub fn join(mut self, timeout: Duration) -> Result<(), String> {
        if let Some(handle) = self.thread_handle.take() {
            self.handle.shutdown();

            let start = std::time::Instant::now();
            loop {
                if handle.is_finished() {
                    let _ = handle.join();
                    return Ok(());
                }
                if start.elapsed() > timeout {
                    return Err("Player thread did not exit in time".to_string());
                }
                thread::sleep(Duration::from_millis(10));
            }
        }
        Ok(())
    }
}

impl Drop for PlayerThreadHandle {
    fn drop(&mut self) {
        self.handle.shutdown();
    }
}

/// Spawn the player thread
///
/// The orchestrator starts in `NoData`; the host drives it through the
/// returned handle and receives effects on `effect_rx`.
pub fn spawn_player(dataset: Dataset, config: PlayerConfig) -> Result<PlayerThreadHandle, String> {
    let (command_tx, command_rx) = player_command_channel();
    let (effect_tx, effect_rx) = player_effect_channel();

    let state = SharedPlayerState::new();
    let state_clone = state.clone();

    let handle = PlayerHandle::new(command_tx, state);

    let thread_handle = thread::Builder::new()
        .name("sundarkand-player".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    tracing::error!("Failed to build player runtime: {}", e);
                    return;
                }
            };

            let player = PlayerOrchestrator::new(dataset, config);
            runtime.block_on(player_main(player, command_rx, effect_tx, state_clone));
        })
        .map_err(|e| format!("Failed to spawn player thread: {}", e))?;

    Ok(PlayerThreadHandle {
        handle,
        effect_rx: Some(effect_rx),
        thread_handle: Some(thread_handle),
    })
}

/// Main loop for the player thread
///
/// Waits for either the next command or the next timer deadline, whichever
/// comes first. Every step ends by forwarding effects and publishing a fresh
/// snapshot.
async fn player_main(
    mut player: PlayerOrchestrator,
    mut command_rx: PlayerCommandReceiver,
    effect_tx: PlayerEffectSender,
    state: SharedPlayerState,
) {
    tracing::info!("Player thread started");
    let origin = Instant::now();
    flush(&mut player, &effect_tx, &state);

    loop {
        let command = match player.next_deadline() {
            Some(deadline) => {
                tokio::select! {
                    command = command_rx.recv() => command,
                    _ = tokio::time::sleep_until(origin + deadline) => {
                        player.advance_to(origin.elapsed());
                        flush(&mut player, &effect_tx, &state);
                        continue;
                    }
                }
            }
            None => command_rx.recv().await,
        };

        match command {
            Some(PlayerCommand::Event(event)) => {
                // Fire anything already due so new timers start from now
                player.advance_to(origin.elapsed());
                player.dispatch(event);
            }
            Some(PlayerCommand::Shutdown) => {
                tracing::info!("Player shutdown requested");
                break;
            }
            None => {
                tracing::debug!("All player handles dropped");
                break;
            }
        }

        flush(&mut player, &effect_tx, &state);
    }

    tracing::info!("Player thread stopped");
}

fn flush(player: &mut PlayerOrchestrator, effect_tx: &PlayerEffectSender, state: &SharedPlayerState) {
    for effect in player.drain_effects() {
        tracing::debug!("Effect: {:?}", effect);
        let _ = effect_tx.send(effect);
    }
    state.publish(player.snapshot());
}
