//! Lyric interaction region: clicks, manual scroll, actor echoes
//!
//! This region never changes state. It forwards user interaction to the
//! child actors and mirrors what the actors report into the context.

use serde::Serialize;

use super::{ActorMessage, Reaction, RegionEnv, RegionInput, RegionSignal};
use crate::lyrics::{find_outline_index, first_lyric_of_outline};
use crate::player::actors::{LyricSyncMessage, ScrollMessage, SupervisorMessage};
use crate::player::context::ContextPatch;
use crate::player::events::{MediaIntent, PlayerEffect, PlayerEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LyricInteractionState {
    Idle,
}

impl LyricInteractionState {
    pub fn transition(self, input: RegionInput<'_>, env: &RegionEnv<'_>) -> (Self, Reaction) {
        let reaction = match input {
            RegionInput::Event(&PlayerEvent::ClickLyric { index }) => click_lyric(index, env),
            RegionInput::Event(&PlayerEvent::ClickOutline { index }) => click_outline(index, env),
            RegionInput::Event(PlayerEvent::ManualScroll) => {
                Reaction::none().send(ActorMessage::Scroll(ScrollMessage::Scroll))
            }
            RegionInput::Supervisor(SupervisorMessage::LyricUpdate {
                index,
                outline_index,
            }) => Reaction::with_patch(ContextPatch {
                current_lyric_index: Some(index),
                current_outline_index: Some(outline_index),
                ..Default::default()
            }),
            RegionInput::Supervisor(SupervisorMessage::ScrollModeChanged { scrolling }) => {
                Reaction::with_patch(ContextPatch {
                    is_manual_scrolling: Some(scrolling),
                    ..Default::default()
                })
                .effect(PlayerEffect::ManualScrollChanged { active: scrolling })
            }
            _ => Reaction::none(),
        };
        (self, reaction)
    }
}

/// Jump straight to a lyric, bypassing the seek handshake
fn click_lyric(index: usize, env: &RegionEnv<'_>) -> Reaction {
    let Some(lyric) = env.dataset.lyric(index) else {
        tracing::warn!(
            "Ignoring click on lyric {} ({} lyrics loaded)",
            index,
            env.dataset.lyrics().len()
        );
        return Reaction::none();
    };

    let outline_index = find_outline_index(env.dataset.lyrics(), Some(index));
    let position = lyric.time;
    tracing::debug!("Lyric {} clicked, jumping to {:.2}s", index, position);

    Reaction::with_patch(ContextPatch {
        seek_position: Some(Some(position)),
        ..Default::default()
    })
    .send(ActorMessage::LyricSync(LyricSyncMessage::Update {
        index: Some(index),
        outline_index,
    }))
    .effect(PlayerEffect::ScrollIntoView { index })
    .effect(PlayerEffect::Media(MediaIntent::Seek { position }))
}

/// Seek to the first lyric of an outline section
fn click_outline(index: usize, env: &RegionEnv<'_>) -> Reaction {
    let Some(first) = first_lyric_of_outline(env.dataset.lyrics(), index) else {
        tracing::debug!("Outline {} has no lyrics", index);
        return Reaction::none();
    };
    let position = env.dataset.lyrics()[first].time;

    Reaction::none()
        .signal(RegionSignal::BeginSeek { position })
        .effect(PlayerEffect::Media(MediaIntent::Seek { position }))
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
            Lyric::new(10.0, LyricKind::Chaupai, "b", 0),
            Lyric::new(20.0, LyricKind::Samput, "c", 1),
        ];
        Dataset::new(lyrics, vec!["x".into(), "y".into()], Vec::new()).unwrap()
    }

    fn run(input: RegionInput<'_>) -> Reaction {
        let ctx = PlayerContext::default();
        let dataset = dataset();
        let config = PlayerConfig::default();
        let env = RegionEnv {
            ctx: &ctx,
            dataset: &dataset,
            config: &config,
        };
        let (state, reaction) = LyricInteractionState::Idle.transition(input, &env);
        assert_eq!(state, LyricInteractionState::Idle);
        reaction
    }

    #[test]
    fn test_click_lyric() {
        let reaction = run(RegionInput::Event(&PlayerEvent::ClickLyric { index: 2 }));
        assert_eq!(reaction.patch.seek_position, Some(Some(20.0)));
        assert_eq!(
            reaction.actor_messages,
            vec![ActorMessage::LyricSync(LyricSyncMessage::Update {
                index: Some(2),
                outline_index: 1
            })]
        );
        assert!(
            reaction
                .effects
                .contains(&PlayerEffect::ScrollIntoView { index: 2 })
        );
    }

    #[test]
    fn test_click_lyric_out_of_range_is_ignored() {
        let reaction = run(RegionInput::Event(&PlayerEvent::ClickLyric { index: 3 }));
        assert!(reaction.is_empty());
    }

    #[test]
    fn test_manual_scroll_goes_to_actor() {
        let reaction = run(RegionInput::Event(&PlayerEvent::ManualScroll));
        assert_eq!(
            reaction.actor_messages,
            vec![ActorMessage::Scroll(ScrollMessage::Scroll)]
        );
    }

    #[test]
    fn test_lyric_update_is_mirrored() {
        let reaction = run(RegionInput::Supervisor(SupervisorMessage::LyricUpdate {
            index: None,
            outline_index: 0,
        }));
        assert_eq!(reaction.patch.current_lyric_index, Some(None));
        assert_eq!(reaction.patch.current_outline_index, Some(0));
    }

    #[test]
    fn test_click_outline_seeks_to_first_lyric() {
        let reaction = run(RegionInput::Event(&PlayerEvent::ClickOutline { index: 1 }));
        assert_eq!(
            reaction.signals,
            vec![RegionSignal::BeginSeek { position: 20.0 }]
        );

        let reaction = run(RegionInput::Event(&PlayerEvent::ClickOutline { index: 5 }));
        assert!(reaction.is_empty());
    }
}
