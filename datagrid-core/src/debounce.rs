//! Cancel-and-restart debouncing.
//!
//! The debouncer holds at most one pending value with its deadline. Every
//! [`Debouncer::push`] replaces both, so a value is released exactly once,
//! after the input has been quiet for the full delay, unless it is superseded
//! or cancelled first. Time is passed in by the caller.

use std::time::{Duration, Instant};

/// Quiescence period of the text filter input.
pub const TEXT_FILTER_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    deadline: Instant,
    value: T,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm (or re-arm) the timer with a new value.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            deadline: now + self.delay,
            value,
        });
    }

    /// Release the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(TEXT_FILTER_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_fires_once_after_quiescence() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(300));
        d.push("a", t0);
        assert_eq!(d.poll(t0 + ms(299)), None);
        assert_eq!(d.poll(t0 + ms(300)), Some("a"));
        assert_eq!(d.poll(t0 + ms(900)), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn test_each_push_restarts_the_window() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(300));
        d.push("a", t0);
        d.push("an", t0 + ms(200));
        d.push("ana", t0 + ms(400));
        assert_eq!(d.poll(t0 + ms(600)), None);
        assert_eq!(d.poll(t0 + ms(700)), Some("ana"));
    }

    #[test]
    fn test_cancel_drops_pending_value() {
        let t0 = Instant::now();
        let mut d = Debouncer::default();
        d.push(String::from("x"), t0);
        assert_eq!(d.cancel().as_deref(), Some("x"));
        assert_eq!(d.poll(t0 + ms(1_000)), None);
        assert_eq!(d.delay(), TEXT_FILTER_DEBOUNCE);
    }
}
