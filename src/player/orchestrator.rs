//! Top-level player state machine
//!
//! Phases run linearly until playback starts:
//!
//! ```text
//! NoData -> DataLoading -> DataCompletelyLoaded -> PlayingSundarkand
//!    \______ data_loaded ______/        (autoplay timer | play_audio)
//! ```
//!
//! `PlayingSundarkand` is a parallel state: the playback, toast, seek and
//! lyric interaction regions all see every event. Each event is processed to
//! completion (regions, raised signals, patch commit, actor mailboxes and
//! actor replies) before the next one is admitted.

use std::collections::VecDeque;
use std::time::Duration;

use serde::Serialize;

use super::actors::{
    ActorCell, LyricSyncActor, ScrollDebounceActor, ScrollMessage, ScrollState, SupervisorMessage,
    SupervisorReceiver, SupervisorSender, supervisor_channel,
};
use super::context::PlayerContext;
use super::events::{MediaIntent, PlayerEffect, PlayerEvent};
use super::regions::{
    ActorMessage, Reaction, RegionEnv, RegionInput, RegionSignal, RegionStates, TimerRequest,
};
use super::snapshot::PlayerSnapshot;
use super::timer::{TimerKey, TimerQueue, TimerToken};
use crate::lyrics::Dataset;

/// Timing and initial values for a player instance
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Delay before `DataCompletelyLoaded` starts playback on its own
    pub autoplay_delay: Duration,
    /// How long a skip toast stays visible after the last skip
    pub toast_duration: Duration,
    /// Quiet period after the last manual scroll
    pub scroll_debounce: Duration,
    pub initial_volume: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            autoplay_delay: Duration::from_millis(100),
            toast_duration: Duration::from_millis(500),
            scroll_debounce: Duration::from_millis(15_000),
            initial_volume: 1.0,
        }
    }
}

/// Top-level phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerPhase {
    NoData,
    DataLoading,
    DataCompletelyLoaded,
    PlayingSundarkand,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TopState {
    NoData,
    DataLoading,
    DataCompletelyLoaded,
    PlayingSundarkand(RegionStates),
}

impl TopState {
    fn phase(&self) -> PlayerPhase {
        match self {
            TopState::NoData => PlayerPhase::NoData,
            TopState::DataLoading => PlayerPhase::DataLoading,
            TopState::DataCompletelyLoaded => PlayerPhase::DataCompletelyLoaded,
            TopState::PlayingSundarkand(_) => PlayerPhase::PlayingSundarkand,
        }
    }
}

/// Child actors, spawned once data is loaded
#[derive(Debug)]
struct Children {
    lyric_sync: ActorCell<LyricSyncActor>,
    scroll: ActorCell<ScrollDebounceActor>,
}

/// The player state machine
///
/// Owns the shared context, the timer queue and both child actors. The host
/// feeds it events with `dispatch`, moves time forward with `advance`, and
/// collects intents with `drain_effects`.
#[derive(Debug)]
pub struct PlayerOrchestrator {
    state: TopState,
    ctx: PlayerContext,
    dataset: Dataset,
    config: PlayerConfig,
    timers: TimerQueue,
    children: Option<Children>,
    supervisor_tx: SupervisorSender,
    supervisor_rx: SupervisorReceiver,
    effects: Vec<PlayerEffect>,
    version: u64,
}

impl PlayerOrchestrator {
    pub fn new(dataset: Dataset, config: PlayerConfig) -> Self {
        let (supervisor_tx, supervisor_rx) = supervisor_channel();
        Self {
            state: TopState::NoData,
            ctx: PlayerContext::new(config.initial_volume),
            dataset,
            config,
            timers: TimerQueue::new(),
            children: None,
            supervisor_tx,
            supervisor_rx,
            effects: Vec::new(),
            version: 0,
        }
    }

    // ============ Queries ============

    pub fn phase(&self) -> PlayerPhase {
        self.state.phase()
    }

    /// Region states while playing
    pub fn regions(&self) -> Option<&RegionStates> {
        match &self.state {
            TopState::PlayingSundarkand(regions) => Some(regions),
            _ => None,
        }
    }

    pub fn context(&self) -> &PlayerContext {
        &self.ctx
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Earliest pending timer, if any
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn has_actors(&self) -> bool {
        self.children.is_some()
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.children
            .as_ref()
            .map(|c| c.scroll.actor().state())
            .unwrap_or(ScrollState::Idle)
    }

    /// Indices held by the lyric sync actor
    pub fn lyric_sync_indices(&self) -> Option<(Option<usize>, usize)> {
        self.children.as_ref().map(|c| {
            let actor = c.lyric_sync.actor();
            (actor.current_lyric_index(), actor.current_outline_index())
        })
    }

    /// Number of completed steps; bumps whenever anything was processed
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            phase: self.phase(),
            regions: self.regions().copied(),
            scroll: self.scroll_state(),
            context: self.ctx.clone(),
            dataset: self.dataset.clone(),
            version: self.version,
        }
    }

    /// Take the effects emitted since the last call
    pub fn drain_effects(&mut self) -> Vec<PlayerEffect> {
        std::mem::take(&mut self.effects)
    }

    // ============ Input ============

    /// Process one external event to completion
    pub fn dispatch(&mut self, event: PlayerEvent) {
        tracing::debug!("Event {} in {:?}", event.name(), self.phase());
        self.handle_event(&event);
        self.drain_children();
        self.version += 1;
    }

    /// Move the virtual clock forward by `elapsed`, firing due timers
    pub fn advance(&mut self, elapsed: Duration) {
        self.advance_to(self.timers.now() + elapsed);
    }

    /// Move the virtual clock to `now`, firing due timers in order
    pub fn advance_to(&mut self, now: Duration) {
        while let Some(token) = self.timers.pop_due(now) {
            self.handle_timer(token);
            self.drain_children();
            self.version += 1;
        }
        self.timers.set_now(now);
    }

    // ============ Top-level transitions ============

    fn handle_event(&mut self, event: &PlayerEvent) {
        match (self.state, event) {
            (TopState::NoData, PlayerEvent::DataLoadingStarted) => {
                tracing::info!("Data loading started");
                self.state = TopState::DataLoading;
            }
            (TopState::NoData | TopState::DataLoading, &PlayerEvent::DataLoaded { duration }) => {
                self.enter_data_loaded(duration);
            }
            (TopState::DataCompletelyLoaded, PlayerEvent::PlayAudio) => {
                self.timers.cancel(TimerKey::Autoplay);
                self.enter_playing();
            }
            (TopState::PlayingSundarkand(_), event) => {
                self.run_regions(RegionInput::Event(event));
            }
            (state, event) => {
                tracing::debug!("Ignoring {} in {:?}", event.name(), state.phase());
            }
        }
    }

    fn handle_timer(&mut self, token: TimerToken) {
        tracing::trace!("Timer fired: {:?}", token);
        match token.key {
            TimerKey::Autoplay => {
                if self.state == TopState::DataCompletelyLoaded {
                    self.enter_playing();
                }
            }
            TimerKey::ToastHide => self.run_regions(RegionInput::Timer(token)),
            TimerKey::ScrollDebounce => {
                if let Some(children) = &self.children {
                    children
                        .scroll
                        .address()
                        .send(ScrollMessage::QuietPeriodElapsed(token));
                }
            }
        }
    }

    fn enter_data_loaded(&mut self, duration: f64) {
        if self.children.is_none() {
            self.children = Some(Children {
                lyric_sync: ActorCell::spawn(LyricSyncActor::new(self.supervisor_tx.clone())),
                scroll: ActorCell::spawn(ScrollDebounceActor::new(
                    self.config.scroll_debounce,
                    self.supervisor_tx.clone(),
                )),
            });
        }
        self.ctx.duration = duration;
        self.state = TopState::DataCompletelyLoaded;
        tracing::info!("Data loaded, duration {:.2}s", duration);

        self.effects.push(PlayerEffect::DataLoadedNotice);
        self.effects.push(PlayerEffect::ReadyToPlayNotice);
        self.timers
            .schedule(TimerKey::Autoplay, self.config.autoplay_delay);
    }

    fn enter_playing(&mut self) {
        tracing::info!("Playing Sundarkand");
        self.state = TopState::PlayingSundarkand(RegionStates::default());
        self.effects.push(PlayerEffect::Media(MediaIntent::Play));
    }

    // ============ Regions ============

    /// Run one input through every region, deliver raised signals, commit
    fn run_regions(&mut self, input: RegionInput<'_>) {
        let TopState::PlayingSundarkand(mut regions) = self.state else {
            return;
        };

        let env = RegionEnv {
            ctx: &self.ctx,
            dataset: &self.dataset,
            config: &self.config,
        };

        let mut reaction = regions.react(input, &env);
        let mut signals: VecDeque<RegionSignal> = std::mem::take(&mut reaction.signals).into();
        while let Some(signal) = signals.pop_front() {
            let mut raised = regions.react(RegionInput::Signal(signal), &env);
            signals.extend(std::mem::take(&mut raised.signals));
            reaction.merge(raised);
        }

        if reaction.is_empty() && self.state == TopState::PlayingSundarkand(regions) {
            tracing::trace!("{:?} had no effect", input);
            return;
        }

        self.state = TopState::PlayingSundarkand(regions);
        self.commit(reaction);
    }

    /// Apply a merged reaction atomically
    fn commit(&mut self, reaction: Reaction) {
        let Reaction {
            patch,
            signals: _,
            actor_messages,
            timers,
            effects,
        } = reaction;

        patch.apply(&mut self.ctx);

        for request in timers {
            match request {
                TimerRequest::Schedule { key, delay } => {
                    self.timers.schedule(key, delay);
                }
                TimerRequest::Cancel(key) => {
                    self.timers.cancel(key);
                }
            }
        }

        if let Some(children) = &self.children {
            for message in actor_messages {
                match message {
                    ActorMessage::LyricSync(m) => children.lyric_sync.address().send(m),
                    ActorMessage::Scroll(m) => children.scroll.address().send(m),
                }
            }
        }

        self.effects.extend(effects);
    }

    // ============ Actors ============

    /// Run actor mailboxes and feed their replies back until quiescent
    fn drain_children(&mut self) {
        loop {
            let mut handled = 0;
            if let Some(children) = self.children.as_mut() {
                handled += children.lyric_sync.run(&mut self.timers);
                handled += children.scroll.run(&mut self.timers);
            }

            let mut replies = 0;
            while let Ok(message) = self.supervisor_rx.try_recv() {
                self.handle_supervisor(message);
                replies += 1;
            }

            if handled == 0 && replies == 0 {
                break;
            }
        }
    }

    fn handle_supervisor(&mut self, message: SupervisorMessage) {
        tracing::trace!("Supervisor <- {:?}", message);
        self.run_regions(RegionInput::Supervisor(message));
    }
}
