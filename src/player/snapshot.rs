//! Read-only views of the player
//!
//! `PlayerSnapshot` captures everything a presentation layer needs after a
//! step. `SharedPlayerState` holds the latest snapshot behind a lock so the
//! host can read it without talking to the player thread.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use super::actors::ScrollState;
use super::context::PlayerContext;
use super::events::ToastDirection;
use super::orchestrator::PlayerPhase;
use super::regions::RegionStates;
use crate::lyrics::{Dataset, Lyric};

/// State of the player after a completed step
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub phase: PlayerPhase,
    /// Region states, present only while playing
    pub regions: Option<RegionStates>,
    pub scroll: ScrollState,
    pub context: PlayerContext,
    #[serde(skip)]
    pub dataset: Dataset,
    /// Orchestrator step counter at capture time
    pub version: u64,
}

impl Default for PlayerSnapshot {
    fn default() -> Self {
        Self {
            phase: PlayerPhase::NoData,
            regions: None,
            scroll: ScrollState::Idle,
            context: PlayerContext::default(),
            dataset: Dataset::default(),
            version: 0,
        }
    }
}

impl PlayerSnapshot {
    pub fn is_playing(&self) -> bool {
        self.regions.is_some_and(|r| r.playback.is_playing())
    }

    pub fn is_paused(&self) -> bool {
        self.regions.is_some_and(|r| !r.playback.is_playing())
    }

    pub fn visible_toast(&self) -> Option<ToastDirection> {
        self.regions.and_then(|r| r.toast.direction())
    }

    pub fn is_seeking(&self) -> bool {
        self.regions.is_some_and(|r| r.seek.is_seeking())
    }

    pub fn is_manual_scrolling(&self) -> bool {
        self.scroll == ScrollState::Scrolling
    }

    /// Position to display: the seek target while a seek is in flight,
    /// the confirmed position otherwise
    pub fn display_position(&self) -> f64 {
        let pending = if self.is_seeking() {
            self.context.seek_position
        } else {
            None
        };
        pending
            .or(self.context.current_position)
            .unwrap_or(0.0)
    }

    /// Playback progress in `[0, 1]`, zero while the duration is unknown
    pub fn progress(&self) -> f64 {
        if self.context.duration > 0.0 {
            (self.display_position() / self.context.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Highlighted lyric line
    pub fn current_lyric(&self) -> Option<&Lyric> {
        self.context
            .current_lyric_index
            .and_then(|i| self.dataset.lyric(i))
    }

    /// Title of the highlighted outline section
    pub fn current_outline_title(&self) -> Option<&str> {
        self.dataset
            .outline_title(self.context.current_outline_index)
    }
}

/// Latest snapshot, shared between the player thread and the host
#[derive(Clone, Default)]
pub struct SharedPlayerState {
    inner: Arc<RwLock<PlayerSnapshot>>,
}

impl std::fmt::Debug for SharedPlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("SharedPlayerState")
            .field("phase", &inner.phase)
            .field("position", &inner.context.current_position)
            .field("lyric", &inner.context.current_lyric_index)
            .field("version", &inner.version)
            .finish()
    }
}

impl SharedPlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the latest snapshot
    pub fn get(&self) -> PlayerSnapshot {
        self.inner.read().clone()
    }

    /// Replace the snapshot (player thread only)
    pub fn publish(&self, snapshot: PlayerSnapshot) {
        *self.inner.write() = snapshot;
    }

    pub fn phase(&self) -> PlayerPhase {
        self.inner.read().phase
    }

    pub fn is_playing(&self) -> bool {
        self.inner.read().is_playing()
    }

    pub fn current_lyric_index(&self) -> Option<usize> {
        self.inner.read().context.current_lyric_index
    }

    pub fn version(&self) -> u64 {
        self.inner.read().version
    }
}
