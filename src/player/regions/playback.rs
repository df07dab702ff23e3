//! Playback region: playing/paused, volume, position reports

use serde::Serialize;

use super::{ActorMessage, Reaction, RegionEnv, RegionInput, RegionSignal};
use crate::lyrics::{find_lyric_index, find_outline_index};
use crate::player::actors::LyricSyncMessage;
use crate::player::context::ContextPatch;
use crate::player::events::{MediaIntent, PlayerEffect, PlayerEvent, ToastDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    PlayingAudio,
    PausedAudio,
}

impl PlaybackState {
    pub fn transition(self, input: RegionInput<'_>, env: &RegionEnv<'_>) -> (Self, Reaction) {
        let RegionInput::Event(event) = input else {
            return (self, Reaction::none());
        };

        match (self, event) {
            (Self::PlayingAudio, PlayerEvent::Pause) => (
                Self::PausedAudio,
                Reaction::none().effect(PlayerEffect::Media(MediaIntent::Pause)),
            ),
            (Self::PausedAudio, PlayerEvent::PlayAfterPause) => (
                Self::PlayingAudio,
                Reaction::none().effect(PlayerEffect::Media(MediaIntent::Play)),
            ),
            (_, PlayerEvent::Forward) => (
                self,
                Reaction::none().signal(RegionSignal::ShowToast(ToastDirection::Forward)),
            ),
            (_, PlayerEvent::Backward) => (
                self,
                Reaction::none().signal(RegionSignal::ShowToast(ToastDirection::Backward)),
            ),
            (_, &PlayerEvent::Seek { position }) => (
                self,
                Reaction::none()
                    .signal(RegionSignal::BeginSeek { position })
                    .effect(PlayerEffect::Media(MediaIntent::Seek { position })),
            ),
            (Self::PlayingAudio, &PlayerEvent::TimeUpdate { current_time }) => {
                let lyrics = env.dataset.lyrics();
                let index = find_lyric_index(lyrics, current_time);
                let outline_index = find_outline_index(lyrics, index);
                tracing::trace!(
                    "time_update {:.2}s -> lyric {:?}, outline {}",
                    current_time,
                    index,
                    outline_index
                );
                // Only valid clock readings are committed; negative clamps to 0
                let patch = ContextPatch {
                    current_position: current_time
                        .is_finite()
                        .then(|| Some(current_time.max(0.0))),
                    ..Default::default()
                };
                (
                    self,
                    Reaction::with_patch(patch).send(ActorMessage::LyricSync(
                        LyricSyncMessage::Update {
                            index,
                            outline_index,
                        },
                    )),
                )
            }
            (_, &PlayerEvent::ChangeVolume { volume }) => {
                let patch = ContextPatch {
                    volume: Some(volume),
                    ..Default::default()
                };
                (
                    self,
                    Reaction::with_patch(patch)
                        .effect(PlayerEffect::Media(MediaIntent::SetVolume { volume })),
                )
            }
            (_, PlayerEvent::ToggleMute) => {
                let muted = !env.ctx.is_muted;
                let patch = ContextPatch {
                    is_muted: Some(muted),
                    ..Default::default()
                };
                (
                    self,
                    Reaction::with_patch(patch)
                        .effect(PlayerEffect::Media(MediaIntent::SetMuted { muted })),
                )
            }
            _ => (self, Reaction::none()),
        }
    }

    pub fn is_playing(&self) -> bool {
        *self == Self::PlayingAudio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::{Dataset, Lyric, LyricKind};
    use crate::player::PlayerConfig;
    use crate::player::context::PlayerContext;

    fn dataset() -> Dataset {
        let lyrics = vec![
            Lyric::new(0.0, LyricKind::Chaupai, "a", 0),
            Lyric::new(10.0, LyricKind::Chaupai, "b", 1),
            Lyric::new(20.0, LyricKind::Doha, "c", 2),
        ];
        Dataset::new(lyrics, Vec::new(), Vec::new()).unwrap()
    }

    fn run(state: PlaybackState, event: PlayerEvent) -> (PlaybackState, Reaction) {
        let ctx = PlayerContext::default();
        let dataset = dataset();
        let config = PlayerConfig::default();
        let env = RegionEnv {
            ctx: &ctx,
            dataset: &dataset,
            config: &config,
        };
        state.transition(RegionInput::Event(&event), &env)
    }

    #[test]
    fn test_pause_and_resume() {
        let (state, reaction) = run(PlaybackState::PlayingAudio, PlayerEvent::Pause);
        assert_eq!(state, PlaybackState::PausedAudio);
        assert_eq!(reaction.effects, vec![PlayerEffect::Media(MediaIntent::Pause)]);

        let (state, _) = run(state, PlayerEvent::PlayAfterPause);
        assert_eq!(state, PlaybackState::PlayingAudio);
    }

    #[test]
    fn test_pause_while_paused_is_ignored() {
        let (state, reaction) = run(PlaybackState::PausedAudio, PlayerEvent::Pause);
        assert_eq!(state, PlaybackState::PausedAudio);
        assert!(reaction.is_empty());
    }

    #[test]
    fn test_time_update_only_while_playing() {
        let (_, reaction) = run(
            PlaybackState::PlayingAudio,
            PlayerEvent::TimeUpdate { current_time: 15.0 },
        );
        assert_eq!(reaction.patch.current_position, Some(Some(15.0)));
        assert_eq!(
            reaction.actor_messages,
            vec![ActorMessage::LyricSync(LyricSyncMessage::Update {
                index: Some(1),
                outline_index: 1
            })]
        );

        let (_, reaction) = run(
            PlaybackState::PausedAudio,
            PlayerEvent::TimeUpdate { current_time: 15.0 },
        );
        assert!(reaction.is_empty());
    }

    #[test]
    fn test_time_update_normalises_invalid_clock() {
        let (_, reaction) = run(
            PlaybackState::PlayingAudio,
            PlayerEvent::TimeUpdate { current_time: -5.0 },
        );
        assert_eq!(reaction.patch.current_position, Some(Some(0.0)));
        assert_eq!(
            reaction.actor_messages,
            vec![ActorMessage::LyricSync(LyricSyncMessage::Update {
                index: None,
                outline_index: 0
            })]
        );

        let (_, reaction) = run(
            PlaybackState::PlayingAudio,
            PlayerEvent::TimeUpdate {
                current_time: f64::NAN,
            },
        );
        assert_eq!(reaction.patch.current_position, None);
        assert_eq!(reaction.actor_messages.len(), 1);
    }

    #[test]
    fn test_forward_raises_toast_signal_in_both_states() {
        for state in [PlaybackState::PlayingAudio, PlaybackState::PausedAudio] {
            let (next, reaction) = run(state, PlayerEvent::Forward);
            assert_eq!(next, state);
            assert_eq!(
                reaction.signals,
                vec![RegionSignal::ShowToast(ToastDirection::Forward)]
            );
        }
    }

    #[test]
    fn test_seek_raises_signal_and_intent() {
        let (state, reaction) = run(
            PlaybackState::PausedAudio,
            PlayerEvent::Seek { position: 42.0 },
        );
        assert_eq!(state, PlaybackState::PausedAudio);
        assert_eq!(
            reaction.signals,
            vec![RegionSignal::BeginSeek { position: 42.0 }]
        );
        assert_eq!(
            reaction.effects,
            vec![PlayerEffect::Media(MediaIntent::Seek { position: 42.0 })]
        );
        assert!(reaction.patch.is_empty());
    }

    #[test]
    fn test_change_volume_is_not_clamped() {
        let (_, reaction) = run(
            PlaybackState::PausedAudio,
            PlayerEvent::ChangeVolume { volume: 1.5 },
        );
        assert_eq!(reaction.patch.volume, Some(1.5));
    }

    #[test]
    fn test_toggle_mute() {
        let (_, reaction) = run(PlaybackState::PlayingAudio, PlayerEvent::ToggleMute);
        assert_eq!(reaction.patch.is_muted, Some(true));
    }
}
