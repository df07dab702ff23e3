//! Deterministic timer service
//!
//! Timers run on a virtual clock (`Duration` since the orchestrator started)
//! so every delayed transition can be driven exactly in tests and mapped onto
//! wall-clock time by the runtime thread.
//!
//! Each timed state owns one `TimerKey`. Scheduling a key again cancels its
//! pending instance and bumps the generation, so a stale expiry can never
//! fire after the state was re-entered.

use std::collections::HashMap;
use std::time::Duration;

/// Identity of a timed state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// `DataCompletelyLoaded` → `PlayingSundarkand`
    Autoplay,
    /// Toast auto-hide
    ToastHide,
    /// Manual scroll quiet period
    ScrollDebounce,
}

/// A scheduled timer instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub key: TimerKey,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    token: TimerToken,
    due: Duration,
}

/// Schedule-once timers with cancel-on-reschedule semantics
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_generation: u64,
    pending: Vec<PendingTimer>,
    active: HashMap<TimerKey, u64>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `key` to fire `delay` from now, replacing any pending instance
    pub fn schedule(&mut self, key: TimerKey, delay: Duration) -> TimerToken {
        self.cancel(key);
        self.next_generation += 1;
        let token = TimerToken {
            key,
            generation: self.next_generation,
        };
        self.pending.push(PendingTimer {
            token,
            due: self.now + delay,
        });
        self.active.insert(key, token.generation);
        token
    }

    /// Cancel the pending instance of `key`, if any
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.token.key != key);
        self.active.remove(&key);
        before != self.pending.len()
    }

    /// Whether `token` is still the live instance of its key
    pub fn is_current(&self, token: TimerToken) -> bool {
        self.active.get(&token.key) == Some(&token.generation)
    }

    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.active.contains_key(&key)
    }

    /// Earliest due time among pending timers
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Pop the earliest timer due at or before `until`.
    ///
    /// The clock moves to the timer's due time so anything scheduled while
    /// handling it is relative to that instant. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerToken> {
        let (idx, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.token.generation))?;

        let fired = self.pending.remove(idx);
        self.active.remove(&fired.token.key);
        if fired.due > self.now {
            self.now = fired.due;
        }
        Some(fired.token)
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_fires_at_due_time() {
        let mut timers = TimerQueue::new();
        let token = timers.schedule(TimerKey::ToastHide, ms(500));
        assert_eq!(timers.next_deadline(), Some(ms(500)));
        assert_eq!(timers.pop_due(ms(499)), None);
        assert_eq!(timers.pop_due(ms(500)), Some(token));
        assert_eq!(timers.now(), ms(500));
        assert!(!timers.is_pending(TimerKey::ToastHide));
    }

    #[test]
    fn test_reschedule_replaces_pending_instance() {
        let mut timers = TimerQueue::new();
        let first = timers.schedule(TimerKey::ScrollDebounce, ms(100));
        timers.set_now(ms(50));
        let second = timers.schedule(TimerKey::ScrollDebounce, ms(100));

        assert_ne!(first.generation, second.generation);
        assert!(!timers.is_current(first));
        assert!(timers.is_current(second));
        assert_eq!(timers.pop_due(ms(120)), None);
        assert_eq!(timers.pop_due(ms(150)), Some(second));
    }

    #[test]
    fn test_cancel() {
        let mut timers = TimerQueue::new();
        timers.schedule(TimerKey::Autoplay, ms(100));
        assert!(timers.cancel(TimerKey::Autoplay));
        assert!(!timers.cancel(TimerKey::Autoplay));
        assert_eq!(timers.next_deadline(), None);
        assert_eq!(timers.pop_due(ms(1000)), None);
    }

    #[test]
    fn test_pop_due_in_order() {
        let mut timers = TimerQueue::new();
        let late = timers.schedule(TimerKey::ScrollDebounce, ms(300));
        let early = timers.schedule(TimerKey::ToastHide, ms(100));
        let tied = timers.schedule(TimerKey::Autoplay, ms(300));

        assert_eq!(timers.pop_due(ms(1000)), Some(early));
        assert_eq!(timers.pop_due(ms(1000)), Some(late));
        assert_eq!(timers.pop_due(ms(1000)), Some(tied));
        assert_eq!(timers.pop_due(ms(1000)), None);
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let mut timers = TimerQueue::new();
        timers.set_now(ms(200));
        timers.set_now(ms(100));
        assert_eq!(timers.now(), ms(200));
    }
}
