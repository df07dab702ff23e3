//! Lyric sync actor
//!
//! Single source of truth for "which lyric is current", independent of why
//! it changed (playback progress or an explicit click). Every update is
//! echoed to the supervisor, which mirrors it into the shared context.

use super::{Actor, SupervisorMessage, SupervisorSender};
use crate::player::timer::TimerQueue;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LyricSyncMessage {
    Update {
        index: Option<usize>,
        outline_index: usize,
    },
}

#[derive(Debug)]
pub struct LyricSyncActor {
    current_lyric_index: Option<usize>,
    current_outline_index: usize,
    supervisor: SupervisorSender,
}

impl LyricSyncActor {
    pub fn new(supervisor: SupervisorSender) -> Self {
        Self {
            current_lyric_index: None,
            current_outline_index: 0,
            supervisor,
        }
    }

    pub fn current_lyric_index(&self) -> Option<usize> {
        self.current_lyric_index
    }

    pub fn current_outline_index(&self) -> usize {
        self.current_outline_index
    }
}

impl Actor for LyricSyncActor {
    type Message = LyricSyncMessage;

    fn name(&self) -> &'static str {
        "lyric-sync"
    }

    fn receive(&mut self, message: LyricSyncMessage, _timers: &mut TimerQueue) {
        match message {
            LyricSyncMessage::Update {
                index,
                outline_index,
            } => {
                self.current_lyric_index = index;
                self.current_outline_index = outline_index;
                let _ = self.supervisor.send(SupervisorMessage::LyricUpdate {
                    index,
                    outline_index,
                });
            }
        }
    }
}
