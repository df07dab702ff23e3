//! Player handle for non-blocking control from the host
//!
//! `PlayerHandle` sends commands to the player thread and returns
//! immediately. State is read from `SharedPlayerState` without blocking.

use super::events::{PlayerCommand, PlayerCommandSender, PlayerEvent};
use super::snapshot::{PlayerSnapshot, SharedPlayerState};

/// Handle for driving the player from the host
///
/// Sends are fire-and-forget: once the player thread has exited, commands
/// are dropped.
#[derive(Clone)]
pub struct PlayerHandle {
    command_tx: PlayerCommandSender,
    state: SharedPlayerState,
}

impl std::fmt::Debug for PlayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerHandle")
            .field("state", &self.state)
            .finish()
    }
}

impl PlayerHandle {
    pub fn new(command_tx: PlayerCommandSender, state: SharedPlayerState) -> Self {
        Self { command_tx, state }
    }

    /// Send any event
    pub fn send(&self, event: PlayerEvent) {
        let _ = self.command_tx.send(PlayerCommand::Event(event));
    }

    // ============ Loading ============

    pub fn data_loading_started(&self) {
        self.send(PlayerEvent::DataLoadingStarted);
    }

    /// Media metadata is known; `duration` in seconds
    pub fn data_loaded(&self, duration: f64) {
        self.send(PlayerEvent::DataLoaded { duration });
    }

    // ============ Playback Control ============

    pub fn play_audio(&self) {
        self.send(PlayerEvent::PlayAudio);
    }

    pub fn play_after_pause(&self) {
        self.send(PlayerEvent::PlayAfterPause);
    }

    pub fn pause(&self) {
        self.send(PlayerEvent::Pause);
    }

    pub fn forward(&self) {
        self.send(PlayerEvent::Forward);
    }

    pub fn backward(&self) {
        self.send(PlayerEvent::Backward);
    }

    pub fn change_volume(&self, volume: f32) {
        self.send(PlayerEvent::ChangeVolume { volume });
    }

    pub fn toggle_mute(&self) {
        self.send(PlayerEvent::ToggleMute);
    }

    // ============ Position ============

    /// Request a seek; confirm with `seek_complete` or `seek_failed`
    pub fn seek(&self, position: f64) {
        self.send(PlayerEvent::Seek { position });
    }

    pub fn seek_complete(&self) {
        self.send(PlayerEvent::SeekComplete);
    }

    pub fn seek_failed(&self) {
        self.send(PlayerEvent::SeekFailed);
    }

    /// Report the media clock
    pub fn time_update(&self, current_time: f64) {
        self.send(PlayerEvent::TimeUpdate { current_time });
    }

    // ============ Lyrics ============

    pub fn click_lyric(&self, index: usize) {
        self.send(PlayerEvent::ClickLyric { index });
    }

    pub fn click_outline(&self, index: usize) {
        self.send(PlayerEvent::ClickOutline { index });
    }

    pub fn manual_scroll(&self) {
        self.send(PlayerEvent::ManualScroll);
    }

    // ============ Lifecycle ============

    /// Ask the player thread to exit
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(PlayerCommand::Shutdown);
    }

    /// Whether the player thread has exited and dropped its command receiver
    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }

    // ============ State Queries ============

    /// Latest published snapshot
    pub fn snapshot(&self) -> PlayerSnapshot {
        self.state.get()
    }

    pub fn state(&self) -> &SharedPlayerState {
        &self.state
    }
}
