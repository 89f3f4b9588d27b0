//! Pausable countdown with normalized progress
//!
//! Timers do not own subscribers. Every mutating call returns the event it
//! produced and the owner forwards it to the notification bus, so event
//! order is exactly call order.

use serde::{Deserialize, Serialize};

use crate::error::{ArenaError, ArenaResult};

/// Event produced by a timer call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Normalized remaining time in [0, 1]
    Progress(f32),
    /// Remaining time hit zero.
    ///
    /// Stands in for the final `Progress(0.0)` as well: `tick` never returns
    /// a zero progress event, so owners that mirror progress publish the
    /// zero themselves before announcing the end.
    Ended,
}

/// A single time-bounded window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownTimer {
    duration: f32,
    remaining: f32,
    running: bool,
}

impl CountdownTimer {
    /// Build a stopped timer with nothing remaining. Call [`reset`](Self::reset)
    /// to start it.
    pub fn new(name: &'static str, duration: f32) -> ArenaResult<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(ArenaError::InvalidDuration {
                name,
                value: duration,
            });
        }
        Ok(Self {
            duration,
            remaining: 0.0,
            running: false,
        })
    }

    /// Build a timer, or `None` when the duration disables it
    pub fn optional(name: &'static str, duration: f32) -> Option<Self> {
        match Self::new(name, duration) {
            Ok(timer) => Some(timer),
            Err(e) => {
                log::warn!("{e}; {name} disabled");
                None
            }
        }
    }

    /// Refill and start. Safe to call in any state.
    pub fn reset(&mut self) -> TimerEvent {
        self.remaining = self.duration;
        self.running = true;
        TimerEvent::Progress(1.0)
    }

    /// Advance by `dt` seconds.
    ///
    /// Returns `Ended` exactly once, on the tick that exhausts the timer.
    pub fn tick(&mut self, dt: f32) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        self.remaining -= dt.max(0.0);
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.running = false;
            return Some(TimerEvent::Ended);
        }
        Some(TimerEvent::Progress(self.normalized_remaining()))
    }

    /// Stop without touching `remaining`. Produces no event.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Restart a paused timer. An exhausted timer stays stopped.
    pub fn resume(&mut self) {
        if self.remaining > 0.0 {
            self.running = true;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// remaining / duration
    pub fn normalized_remaining(&self) -> f32 {
        self.remaining / self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rejects_non_positive_duration() {
        assert!(CountdownTimer::new("board", 0.0).is_err());
        assert!(CountdownTimer::new("board", -2.0).is_err());
        assert!(CountdownTimer::new("board", f32::NAN).is_err());
        assert!(CountdownTimer::optional("board", 0.0).is_none());
    }

    #[test]
    fn test_reset_starts_full() {
        let mut timer = CountdownTimer::new("board", 30.0).unwrap();
        assert!(!timer.is_running());
        assert_eq!(timer.reset(), TimerEvent::Progress(1.0));
        assert!(timer.is_running());
        assert_eq!(timer.remaining(), 30.0);
    }

    #[test]
    fn test_board_window_scenario() {
        let mut timer = CountdownTimer::new("board", 30.0).unwrap();
        timer.reset();

        let event = timer.tick(29.9);
        match event {
            Some(TimerEvent::Progress(p)) => assert!((p - 0.1 / 30.0).abs() < 1e-3),
            other => panic!("expected progress, got {other:?}"),
        }
        assert!(timer.is_running());

        assert_eq!(timer.tick(0.2), Some(TimerEvent::Ended));
        assert_eq!(timer.remaining(), 0.0);
        assert!(!timer.is_running());

        // Ended never repeats
        assert_eq!(timer.tick(0.2), None);
        assert_eq!(timer.tick(5.0), None);
    }

    #[test]
    fn test_full_tick_ends_once() {
        let mut timer = CountdownTimer::new("charge", 5.0).unwrap();
        timer.reset();
        assert_eq!(timer.tick(5.0), Some(TimerEvent::Ended));
        assert_eq!(timer.tick(0.0), None);
    }

    #[test]
    fn test_ended_leaves_zero_progress() {
        let mut timer = CountdownTimer::new("charge", 2.0).unwrap();
        timer.reset();
        assert!(!timer.is_exhausted());
        assert_eq!(timer.tick(1.0), Some(TimerEvent::Progress(0.5)));
        assert_eq!(timer.tick(1.5), Some(TimerEvent::Ended));
        assert!(timer.is_exhausted());
        assert_eq!(timer.normalized_remaining(), 0.0);
    }

    #[test]
    fn test_resume_refuses_exhausted_timer() {
        let mut timer = CountdownTimer::new("charge", 1.0).unwrap();
        timer.reset();
        timer.tick(2.0);
        timer.resume();
        assert!(!timer.is_running());
        assert_eq!(timer.tick(0.1), None);
    }

    #[test]
    fn test_paused_timer_ignores_ticks() {
        let mut timer = CountdownTimer::new("board", 10.0).unwrap();
        timer.reset();
        timer.tick(1.0);
        timer.pause();
        assert_eq!(timer.tick(3.0), None);
        assert_eq!(timer.remaining(), 9.0);
        timer.resume();
        assert!(timer.is_running());
    }

    proptest! {
        #[test]
        fn prop_pause_resume_keeps_remaining(duration in 0.1f32..100.0, elapsed in 0.0f32..1.0) {
            let mut timer = CountdownTimer::new("board", duration).unwrap();
            timer.reset();
            timer.tick(duration * elapsed * 0.99);
            let before = timer.remaining();
            timer.pause();
            timer.resume();
            prop_assert_eq!(timer.remaining(), before);
        }

        #[test]
        fn prop_remaining_never_increases(steps in proptest::collection::vec(0.0f32..2.0, 1..50)) {
            let mut timer = CountdownTimer::new("board", 10.0).unwrap();
            timer.reset();
            let mut last = timer.remaining();
            let mut ended = 0;
            for dt in steps {
                if timer.tick(dt) == Some(TimerEvent::Ended) {
                    ended += 1;
                }
                prop_assert!(timer.remaining() <= last);
                prop_assert!(timer.remaining() >= 0.0);
                last = timer.remaining();
            }
            prop_assert!(ended <= 1);
        }
    }
}
