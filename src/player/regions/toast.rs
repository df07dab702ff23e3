//! Toast region: transient forward/backward feedback
//!
//! A toast auto-hides after `toast_duration`. Repeating the same direction
//! only restarts the hide timer. The other direction replaces the toast.

use serde::Serialize;

use super::{Reaction, RegionEnv, RegionInput, RegionSignal, TimerRequest};
use crate::player::events::{PlayerEffect, ToastDirection};
use crate::player::timer::TimerKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastState {
    Hidden,
    ShowingForward,
    ShowingBackward,
}

impl ToastState {
    fn showing(direction: ToastDirection) -> Self {
        match direction {
            ToastDirection::Forward => Self::ShowingForward,
            ToastDirection::Backward => Self::ShowingBackward,
        }
    }

    /// Direction of the visible toast
    pub fn direction(&self) -> Option<ToastDirection> {
        match self {
            Self::Hidden => None,
            Self::ShowingForward => Some(ToastDirection::Forward),
            Self::ShowingBackward => Some(ToastDirection::Backward),
        }
    }

    pub fn transition(self, input: RegionInput<'_>, env: &RegionEnv<'_>) -> (Self, Reaction) {
        let restart_timer = TimerRequest::Schedule {
            key: TimerKey::ToastHide,
            delay: env.config.toast_duration,
        };

        match (self.direction(), input) {
            (None, RegionInput::Signal(RegionSignal::ShowToast(direction))) => (
                Self::showing(direction),
                Reaction::none()
                    .effect(PlayerEffect::ShowToast { direction })
                    .timer(restart_timer),
            ),
            (Some(current), RegionInput::Signal(RegionSignal::ShowToast(direction)))
                if current == direction =>
            {
                (self, Reaction::none().timer(restart_timer))
            }
            (Some(_), RegionInput::Signal(RegionSignal::ShowToast(direction))) => (
                Self::showing(direction),
                Reaction::none()
                    .effect(PlayerEffect::HideToast)
                    .effect(PlayerEffect::ShowToast { direction })
                    .timer(restart_timer),
            ),
            (Some(_), RegionInput::Timer(token)) if token.key == TimerKey::ToastHide => {
                (Self::Hidden, Reaction::none().effect(PlayerEffect::HideToast))
            }
            _ => (self, Reaction::none()),
        }
    }
}
