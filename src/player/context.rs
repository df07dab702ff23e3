//! Shared player context
//!
//! `PlayerContext` is owned by the orchestrator. Regions only read it and
//! describe their writes as a `ContextPatch`; all patches produced for one
//! event are merged and applied together.

use serde::Serialize;

/// Extended state of the player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerContext {
    /// Total duration in seconds
    pub duration: f64,
    /// Confirmed playback position, unset until the first report
    pub current_position: Option<f64>,
    /// Pending seek target
    pub seek_position: Option<f64>,
    pub volume: f32,
    pub is_muted: bool,
    /// Highlighted lyric, `None` before the first line
    pub current_lyric_index: Option<usize>,
    pub current_outline_index: usize,
    /// Mirrors the scroll debounce actor
    pub is_manual_scrolling: bool,
}

impl PlayerContext {
    pub fn new(volume: f32) -> Self {
        Self {
            duration: 0.0,
            current_position: None,
            seek_position: None,
            volume,
            is_muted: false,
            current_lyric_index: None,
            current_outline_index: 0,
            is_manual_scrolling: false,
        }
    }

    /// Volume actually heard, accounting for mute
    pub fn effective_volume(&self) -> f32 {
        if self.is_muted { 0.0 } else { self.volume }
    }
}

impl Default for PlayerContext {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Pending writes to `PlayerContext`
///
/// `Some` means "write this value"; for optional fields the inner `Option`
/// is the value written, so `Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextPatch {
    pub duration: Option<f64>,
    pub current_position: Option<Option<f64>>,
    pub seek_position: Option<Option<f64>>,
    pub volume: Option<f32>,
    pub is_muted: Option<bool>,
    pub current_lyric_index: Option<Option<usize>>,
    pub current_outline_index: Option<usize>,
    pub is_manual_scrolling: Option<bool>,
}

impl ContextPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge `later` on top of this patch; later writes win per field
    pub fn merge(&mut self, later: ContextPatch) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        take(&mut self.duration, later.duration);
        take(&mut self.current_position, later.current_position);
        take(&mut self.seek_position, later.seek_position);
        take(&mut self.volume, later.volume);
        take(&mut self.is_muted, later.is_muted);
        take(&mut self.current_lyric_index, later.current_lyric_index);
        take(&mut self.current_outline_index, later.current_outline_index);
        take(&mut self.is_manual_scrolling, later.is_manual_scrolling);
    }

    pub fn apply(self, ctx: &mut PlayerContext) {
        if let Some(v) = self.duration {
            ctx.duration = v;
        }
        if let Some(v) = self.current_position {
            ctx.current_position = v;
        }
        if let Some(v) = self.seek_position {
            ctx.seek_position = v;
        }
        if let Some(v) = self.volume {
            ctx.volume = v;
        }
        if let Some(v) = self.is_muted {
            ctx.is_muted = v;
        }
        if let Some(v) = self.current_lyric_index {
            ctx.current_lyric_index = v;
        }
        if let Some(v) = self.current_outline_index {
            ctx.current_outline_index = v;
        }
        if let Some(v) = self.is_manual_scrolling {
            ctx.is_manual_scrolling = v;
        }
    }
}
