//! Manual scroll debounce actor
//!
//! While the user scrolls the lyric list, automatic "scroll to current lyric"
//! stays suppressed. Each `Scroll` restarts the quiet period; the actor only
//! returns to `Idle` once the period elapses without another scroll.

use std::time::Duration;

use serde::Serialize;

use super::{Actor, SupervisorMessage, SupervisorSender};
use crate::player::timer::{TimerKey, TimerQueue, TimerToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollState {
    Idle,
    Scrolling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMessage {
    Scroll,
    /// Delivered by the supervisor when the debounce timer fires
    QuietPeriodElapsed(TimerToken),
}

#[derive(Debug)]
pub struct ScrollDebounceActor {
    state: ScrollState,
    quiet_period: Duration,
    timer: Option<TimerToken>,
    supervisor: SupervisorSender,
}

impl ScrollDebounceActor {
    pub fn new(quiet_period: Duration, supervisor: SupervisorSender) -> Self {
        Self {
            state: ScrollState::Idle,
            quiet_period,
            timer: None,
            supervisor,
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    fn notify(&self, scrolling: bool) {
        let _ = self
            .supervisor
            .send(SupervisorMessage::ScrollModeChanged { scrolling });
    }
}

impl Actor for ScrollDebounceActor {
    type Message = ScrollMessage;

    fn name(&self) -> &'static str {
        "scroll-debounce"
    }

    fn receive(&mut self, message: ScrollMessage, timers: &mut TimerQueue) {
        match (self.state, message) {
            (ScrollState::Idle, ScrollMessage::Scroll) => {
                self.state = ScrollState::Scrolling;
                self.timer = Some(timers.schedule(TimerKey::ScrollDebounce, self.quiet_period));
                tracing::debug!("Manual scroll started");
                self.notify(true);
            }
            (ScrollState::Scrolling, ScrollMessage::Scroll) => {
                // Internal transition: restart the quiet period only
                self.timer = Some(timers.schedule(TimerKey::ScrollDebounce, self.quiet_period));
            }
            (ScrollState::Scrolling, ScrollMessage::QuietPeriodElapsed(token))
                if self.timer == Some(token) =>
            {
                self.state = ScrollState::Idle;
                self.timer = None;
                tracing::debug!("Manual scroll ended");
                self.notify(false);
            }
            (_, ScrollMessage::QuietPeriodElapsed(token)) => {
                tracing::trace!("Ignoring stale scroll timer {:?}", token);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::actors::supervisor_channel;

    const QUIET: Duration = Duration::from_millis(15_000);

    /// Fire due timers into the actor up to `until`
    fn advance(actor: &mut ScrollDebounceActor, timers: &mut TimerQueue, until: Duration) {
        while let Some(token) = timers.pop_due(until) {
            actor.receive(ScrollMessage::QuietPeriodElapsed(token), timers);
        }
        timers.set_now(until);
    }

    #[test]
    fn test_scroll_enters_scrolling_and_expires() {
        let (tx, mut rx) = supervisor_channel();
        let mut actor = ScrollDebounceActor::new(QUIET, tx);
        let mut timers = TimerQueue::new();

        actor.receive(ScrollMessage::Scroll, &mut timers);
        assert_eq!(actor.state(), ScrollState::Scrolling);

        advance(&mut actor, &mut timers, Duration::from_millis(14_999));
        assert_eq!(actor.state(), ScrollState::Scrolling);

        advance(&mut actor, &mut timers, QUIET);
        assert_eq!(actor.state(), ScrollState::Idle);

        assert_eq!(
            rx.try_recv().unwrap(),
            SupervisorMessage::ScrollModeChanged { scrolling: true }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            SupervisorMessage::ScrollModeChanged { scrolling: false }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_repeated_scroll_restarts_quiet_period() {
        let (tx, mut rx) = supervisor_channel();
        let mut actor = ScrollDebounceActor::new(QUIET, tx);
        let mut timers = TimerQueue::new();

        for step in 0..5u64 {
            advance(&mut actor, &mut timers, Duration::from_millis(step * 10_000));
            actor.receive(ScrollMessage::Scroll, &mut timers);
            assert_eq!(actor.state(), ScrollState::Scrolling);
        }

        // Last scroll at 40s: still scrolling just before 55s
        advance(&mut actor, &mut timers, Duration::from_millis(54_999));
        assert_eq!(actor.state(), ScrollState::Scrolling);
        advance(&mut actor, &mut timers, Duration::from_millis(55_000));
        assert_eq!(actor.state(), ScrollState::Idle);

        // One notification per mode change only
        let messages: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert_eq!(
            messages,
            vec![
                SupervisorMessage::ScrollModeChanged { scrolling: true },
                SupervisorMessage::ScrollModeChanged { scrolling: false },
            ]
        );
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let (tx, _rx) = supervisor_channel();
        let mut actor = ScrollDebounceActor::new(QUIET, tx);
        let mut timers = TimerQueue::new();

        actor.receive(ScrollMessage::Scroll, &mut timers);
        let stale = TimerToken {
            key: TimerKey::ScrollDebounce,
            generation: 0,
        };
        actor.receive(ScrollMessage::QuietPeriodElapsed(stale), &mut timers);
        assert_eq!(actor.state(), ScrollState::Scrolling);
    }
}
