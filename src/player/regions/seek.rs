//! Seek region: two-phase seek handshake
//!
//! The seek target is recorded as soon as a seek is requested, but the
//! confirmed position only moves when the media backend reports completion.
//! A failed seek drops the target and leaves the position untouched.

use serde::Serialize;

use super::{Reaction, RegionEnv, RegionInput, RegionSignal};
use crate::player::context::ContextPatch;
use crate::player::events::{PlayerEffect, PlayerEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeekState {
    Idle,
    Seeking,
}

impl SeekState {
    pub fn transition(self, input: RegionInput<'_>, env: &RegionEnv<'_>) -> (Self, Reaction) {
        match (self, input) {
            // Entry of `Seeking`; a newer request re-enters and wins
            (_, RegionInput::Signal(RegionSignal::BeginSeek { position })) => {
                let patch = ContextPatch {
                    seek_position: Some(Some(position)),
                    ..Default::default()
                };
                (
                    Self::Seeking,
                    Reaction::with_patch(patch)
                        .effect(PlayerEffect::ShowSeekingIndicator { position }),
                )
            }
            (Self::Seeking, RegionInput::Event(PlayerEvent::SeekComplete)) => {
                let mut patch = ContextPatch {
                    seek_position: Some(None),
                    ..Default::default()
                };
                if let Some(target) = env.ctx.seek_position {
                    patch.current_position = Some(Some(target));
                }
                tracing::debug!("Seek completed at {:?}", env.ctx.seek_position);
                (
                    Self::Idle,
                    Reaction::with_patch(patch).effect(PlayerEffect::HideSeekingIndicator),
                )
            }
            (Self::Seeking, RegionInput::Event(PlayerEvent::SeekFailed)) => {
                tracing::debug!("Seek to {:?} failed", env.ctx.seek_position);
                let patch = ContextPatch {
                    seek_position: Some(None),
                    ..Default::default()
                };
                (
                    Self::Idle,
                    Reaction::with_patch(patch).effect(PlayerEffect::HideSeekingIndicator),
                )
            }
            _ => (self, Reaction::none()),
        }
    }

    pub fn is_seeking(&self) -> bool {
        *self == Self::Seeking
    }
}
