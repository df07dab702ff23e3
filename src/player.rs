//! Sundarkand player state machine and runtime
//!
//! - `orchestrator`: the hierarchical state machine (phases + parallel regions)
//! - `regions`: playback, toast, seek and lyric interaction regions
//! - `actors`: lyric sync and scroll debounce child actors
//! - `timer`: virtual-clock timer queue shared by the orchestrator and actors
//! - `thread`: runs the orchestrator on a dedicated thread against real time
//! - `handle`: cheap, cloneable command sender for the host
//!
//! ## Architecture
//! ```text
//! Host (PlayerHandle) --[PlayerCommand]--> Player Thread (PlayerOrchestrator)
//! Host                <--[PlayerEffect]--- Player Thread
//! Host                <--[SharedState]---- Player Thread (non-blocking reads)
//! ```

pub mod actors;
pub mod context;
pub mod events;
pub mod handle;
pub mod orchestrator;
pub mod regions;
pub mod snapshot;
pub mod thread;
pub mod timer;

pub use context::PlayerContext;
pub use events::{
    MediaIntent, PlayerCommand, PlayerEffect, PlayerEffectReceiver, PlayerEvent, ToastDirection,
};
pub use handle::PlayerHandle;
pub use orchestrator::{PlayerConfig, PlayerOrchestrator, PlayerPhase};
pub use snapshot::{PlayerSnapshot, SharedPlayerState};
pub use thread::{PlayerThreadHandle, spawn_player};
