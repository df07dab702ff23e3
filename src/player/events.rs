//! Player communication types
//!
//! - `PlayerEvent` - Inbound events from the UI and the media adapter
//! - `PlayerEffect` - Outbound intents and notifications for the host
//! - `PlayerCommand` - Messages accepted by the runtime thread
//!
//! ## Architecture
//! ```text
//! UI / media adapter --[PlayerCommand]--> Player thread (PlayerOrchestrator)
//! UI / media adapter <--[PlayerEffect]--- Player thread
//! UI                 <--[SharedState]---- Player thread (non-blocking reads)
//! ```

use serde::{Deserialize, Serialize};

// ============ Events (Host -> Orchestrator) ============

/// Inbound event vocabulary
///
/// Events that do not apply to the active state are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerEvent {
    DataLoadingStarted,
    /// Media metadata is available
    DataLoaded { duration: f64 },
    /// Start playback without waiting for autoplay
    PlayAudio,
    PlayAfterPause,
    Pause,
    Forward,
    Backward,
    /// User requested a seek
    Seek { position: f64 },
    /// Media backend confirmed the pending seek
    SeekComplete,
    /// Media backend rejected the pending seek
    SeekFailed,
    /// Periodic playback position report
    TimeUpdate {
        #[serde(rename = "currentTime")]
        current_time: f64,
    },
    ClickLyric { index: usize },
    /// Jump to the first lyric of an outline section
    ClickOutline { index: usize },
    ManualScroll,
    ChangeVolume { volume: f32 },
    ToggleMute,
}

impl PlayerEvent {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::DataLoadingStarted => "data_loading_started",
            Self::DataLoaded { .. } => "data_loaded",
            Self::PlayAudio => "play_audio",
            Self::PlayAfterPause => "play_after_pause",
            Self::Pause => "pause",
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Seek { .. } => "seek",
            Self::SeekComplete => "seek_complete",
            Self::SeekFailed => "seek_failed",
            Self::TimeUpdate { .. } => "time_update",
            Self::ClickLyric { .. } => "click_lyric",
            Self::ClickOutline { .. } => "click_outline",
            Self::ManualScroll => "manual_scroll",
            Self::ChangeVolume { .. } => "change_volume",
            Self::ToggleMute => "toggle_mute",
        }
    }
}

// ============ Effects (Orchestrator -> Host) ============

/// Direction of a skip toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastDirection {
    Forward,
    Backward,
}

impl ToastDirection {
    pub fn message(&self) -> &'static str {
        match self {
            ToastDirection::Forward => "Forwarding",
            ToastDirection::Backward => "Backwarding",
        }
    }
}

/// Requests for the media adapter, which reports the factual outcome back
/// as `TimeUpdate`, `SeekComplete` or `SeekFailed`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum MediaIntent {
    Play,
    Pause,
    Seek { position: f64 },
    SetVolume { volume: f32 },
    SetMuted { muted: bool },
}

/// Side effects emitted by the state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum PlayerEffect {
    /// Entry of `DataCompletelyLoaded`
    DataLoadedNotice,
    ReadyToPlayNotice,
    ShowToast { direction: ToastDirection },
    HideToast,
    ShowSeekingIndicator { position: f64 },
    HideSeekingIndicator,
    /// Bring a lyric line into view
    ScrollIntoView { index: usize },
    /// Automatic scrolling must stay suppressed while `active`
    ManualScrollChanged { active: bool },
    Media(MediaIntent),
}

// ============ Commands (Host -> Runtime) ============

/// Commands accepted by the player thread
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    Event(PlayerEvent),
    /// Stop the player thread
    Shutdown,
}

// ============ Channel Types ============

/// Sender for player commands (held by PlayerHandle)
pub type PlayerCommandSender = tokio::sync::mpsc::UnboundedSender<PlayerCommand>;

/// Receiver for player commands (held by the player thread)
pub type PlayerCommandReceiver = tokio::sync::mpsc::UnboundedReceiver<PlayerCommand>;

/// Sender for player effects (held by the player thread)
pub type PlayerEffectSender = tokio::sync::mpsc::UnboundedSender<PlayerEffect>;

/// Receiver for player effects (held by the host)
pub type PlayerEffectReceiver = tokio::sync::mpsc::UnboundedReceiver<PlayerEffect>;

/// Create a new player command channel
pub fn player_command_channel() -> (PlayerCommandSender, PlayerCommandReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// Create a new player effect channel
pub fn player_effect_channel() -> (PlayerEffectSender, PlayerEffectReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}
