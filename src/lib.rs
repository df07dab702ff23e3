//! Sundarkand player core
//!
//! A headless, event-driven state machine for a lyrics-synchronised audio
//! player. It tracks loading, playback, seeking, skip toasts and manual
//! scrolling, and keeps the highlighted lyric and outline section in sync
//! with the media clock. Audio output and rendering live outside the crate:
//! the host feeds `PlayerEvent`s in and acts on the `PlayerEffect`s that
//! come out.

pub mod lyrics;
pub mod player;
pub mod settings;
pub mod utils;
