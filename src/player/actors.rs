//! Child actors supervised by the orchestrator
//!
//! An actor is a small state machine with private state, reachable only
//! through its mailbox. The orchestrator owns each actor in an `ActorCell`,
//! enqueues messages through an `ActorRef`, and drains mailboxes after every
//! committed step. Actors report back through the supervisor channel
//! registered when they are spawned.

pub mod lyric_sync;
pub mod scroll;

use tokio::sync::mpsc;

use super::timer::TimerQueue;

pub use lyric_sync::{LyricSyncActor, LyricSyncMessage};
pub use scroll::{ScrollDebounceActor, ScrollMessage, ScrollState};

/// Messages sent from actors to their supervisor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SupervisorMessage {
    /// The lyric sync actor accepted new indices
    LyricUpdate {
        index: Option<usize>,
        outline_index: usize,
    },
    /// The scroll debounce actor entered or left `Scrolling`
    ScrollModeChanged { scrolling: bool },
}

pub type SupervisorSender = mpsc::UnboundedSender<SupervisorMessage>;
pub type SupervisorReceiver = mpsc::UnboundedReceiver<SupervisorMessage>;

pub fn supervisor_channel() -> (SupervisorSender, SupervisorReceiver) {
    mpsc::unbounded_channel()
}

/// A message-driven child state machine
pub trait Actor {
    type Message: std::fmt::Debug;

    fn name(&self) -> &'static str;

    /// Handle one message. Timers scheduled here are delivered back as
    /// messages by the supervisor.
    fn receive(&mut self, message: Self::Message, timers: &mut TimerQueue);
}

/// Address of an actor's mailbox
#[derive(Debug)]
pub struct ActorRef<M> {
    tx: mpsc::UnboundedSender<M>,
}

impl<M> Clone for ActorRef<M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<M> ActorRef<M> {
    /// Enqueue a message; dropped silently once the actor is gone
    pub fn send(&self, message: M) {
        let _ = self.tx.send(message);
    }
}

/// An actor together with its mailbox
#[derive(Debug)]
pub struct ActorCell<A: Actor> {
    actor: A,
    address: ActorRef<A::Message>,
    mailbox: mpsc::UnboundedReceiver<A::Message>,
}

impl<A: Actor> ActorCell<A> {
    pub fn spawn(actor: A) -> Self {
        let (tx, mailbox) = mpsc::unbounded_channel();
        tracing::debug!("Spawned actor: {}", actor.name());
        Self {
            actor,
            address: ActorRef { tx },
            mailbox,
        }
    }

    pub fn address(&self) -> ActorRef<A::Message> {
        self.address.clone()
    }

    pub fn actor(&self) -> &A {
        &self.actor
    }

    /// Process every queued message; returns how many were handled
    pub fn run(&mut self, timers: &mut TimerQueue) -> usize {
        let mut handled = 0;
        while let Ok(message) = self.mailbox.try_recv() {
            tracing::trace!("{} <- {:?}", self.actor.name(), message);
            self.actor.receive(message, timers);
            handled += 1;
        }
        handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Counter {
        total: u32,
    }

    impl Actor for Counter {
        type Message = u32;

        fn name(&self) -> &'static str {
            "counter"
        }

        fn receive(&mut self, message: u32, _timers: &mut TimerQueue) {
            self.total += message;
        }
    }

    #[test]
    fn test_cell_drains_mailbox_in_order() {
        let mut timers = TimerQueue::new();
        let mut cell = ActorCell::spawn(Counter::default());
        let address = cell.address();
        address.send(2);
        address.send(3);

        assert_eq!(cell.run(&mut timers), 2);
        assert_eq!(cell.actor().total, 5);
        assert_eq!(cell.run(&mut timers), 0);
    }
}
