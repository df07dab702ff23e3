//! Orthogonal regions of the `PlayingSundarkand` state
//!
//! Each region is a pure transition function: given its current state, an
//! input and a read-only view of the context, it returns its next state and
//! a `Reaction` describing context writes, raised signals, actor messages,
//! timer requests and effects. The orchestrator applies the merged reaction
//! of all regions at once.
//!
//! Cross-region transitions are modelled as broadcast `RegionSignal`s raised
//! by one region and delivered to every region within the same step.

pub mod lyric_interaction;
pub mod playback;
pub mod seek;
pub mod toast;

use std::time::Duration;

use serde::Serialize;

use super::PlayerConfig;
use super::actors::{LyricSyncMessage, ScrollMessage, SupervisorMessage};
use super::context::{ContextPatch, PlayerContext};
use super::events::{PlayerEffect, PlayerEvent, ToastDirection};
use super::timer::{TimerKey, TimerToken};
use crate::lyrics::Dataset;

pub use lyric_interaction::LyricInteractionState;
pub use playback::PlaybackState;
pub use seek::SeekState;
pub use toast::ToastState;

/// Events raised by one region for its siblings
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegionSignal {
    ShowToast(ToastDirection),
    BeginSeek { position: f64 },
}

/// Everything a region can react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegionInput<'a> {
    Event(&'a PlayerEvent),
    Signal(RegionSignal),
    Supervisor(SupervisorMessage),
    Timer(TimerToken),
}

/// Read-only view handed to regions
#[derive(Debug, Clone, Copy)]
pub struct RegionEnv<'a> {
    pub ctx: &'a PlayerContext,
    pub dataset: &'a Dataset,
    pub config: &'a PlayerConfig,
}

/// Message addressed to one of the child actors
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActorMessage {
    LyricSync(LyricSyncMessage),
    Scroll(ScrollMessage),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerRequest {
    Schedule { key: TimerKey, delay: Duration },
    Cancel(TimerKey),
}

/// Outcome of one region handling one input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reaction {
    pub patch: ContextPatch,
    pub signals: Vec<RegionSignal>,
    pub actor_messages: Vec<ActorMessage>,
    pub timers: Vec<TimerRequest>,
    pub effects: Vec<PlayerEffect>,
}

impl Reaction {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_patch(patch: ContextPatch) -> Self {
        Self {
            patch,
            ..Default::default()
        }
    }

    pub fn effect(mut self, effect: PlayerEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn signal(mut self, signal: RegionSignal) -> Self {
        self.signals.push(signal);
        self
    }

    pub fn send(mut self, message: ActorMessage) -> Self {
        self.actor_messages.push(message);
        self
    }

    pub fn timer(mut self, request: TimerRequest) -> Self {
        self.timers.push(request);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Append `later` after this reaction
    pub fn merge(&mut self, later: Reaction) {
        self.patch.merge(later.patch);
        self.signals.extend(later.signals);
        self.actor_messages.extend(later.actor_messages);
        self.timers.extend(later.timers);
        self.effects.extend(later.effects);
    }
}

/// Active state of every region
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionStates {
    pub playback: PlaybackState,
    pub toast: ToastState,
    pub seek: SeekState,
    pub lyric_interaction: LyricInteractionState,
}

impl Default for RegionStates {
    fn default() -> Self {
        Self {
            playback: PlaybackState::PlayingAudio,
            toast: ToastState::Hidden,
            seek: SeekState::Idle,
            lyric_interaction: LyricInteractionState::Idle,
        }
    }
}

impl RegionStates {
    /// Run `input` through every region in declaration order.
    ///
    /// All regions observe the same `env`; their reactions are concatenated.
    pub fn react(&mut self, input: RegionInput<'_>, env: &RegionEnv<'_>) -> Reaction {
        let mut reaction = Reaction::none();

        let (playback, r) = self.playback.transition(input, env);
        self.playback = playback;
        reaction.merge(r);

        let (toast, r) = self.toast.transition(input, env);
        self.toast = toast;
        reaction.merge(r);

        let (seek, r) = self.seek.transition(input, env);
        self.seek = seek;
        reaction.merge(r);

        let (lyric_interaction, r) = self.lyric_interaction.transition(input, env);
        self.lyric_interaction = lyric_interaction;
        reaction.merge(r);

        reaction
    }
}
