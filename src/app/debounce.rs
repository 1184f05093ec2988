//! Search debouncing on top of Zellij timers.
//!
//! Zellij timers cannot be cancelled: every `set_timeout` call produces exactly
//! one `Timer` event. The debouncer therefore counts outstanding timers. Each
//! keystroke arms it and schedules one more timer; each timer event drains one.
//! All timers share the same delay, so the timer scheduled by the last
//! keystroke is the last to fire, and the debounced action runs when the count
//! drops to zero while the debouncer is still armed.

/// Outstanding-timer counter implementing trailing-edge debounce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    delay_ms: u64,
    pending: usize,
    armed: bool,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: 0,
            armed: false,
        }
    }

    /// Registers an input and returns the delay to schedule a timer for.
    pub fn schedule(&mut self) -> u64 {
        self.pending += 1;
        self.armed = true;
        self.delay_ms
    }

    /// Consumes one timer event; `true` when the debounced action should run.
    pub fn on_timer(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        if self.pending == 0 && self.armed {
            self.armed = false;
            return true;
        }
        false
    }

    /// Disarms the debouncer; outstanding timers drain without firing.
    pub fn flush(&mut self) {
        self.armed = false;
    }

    /// Whether a debounced action is waiting to run.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_last_timer() {
        let mut debouncer = Debouncer::new(250);
        assert_eq!(debouncer.schedule(), 250);
        debouncer.schedule();
        debouncer.schedule();

        assert!(!debouncer.on_timer());
        assert!(!debouncer.on_timer());
        assert!(debouncer.on_timer());
        assert!(!debouncer.is_armed());
    }

    #[test]
    fn input_between_timers_extends_the_wait() {
        let mut debouncer = Debouncer::new(250);
        debouncer.schedule();
        debouncer.schedule();
        assert!(!debouncer.on_timer());
        debouncer.schedule();
        assert!(!debouncer.on_timer());
        assert!(debouncer.on_timer());
    }

    #[test]
    fn flushed_timers_drain_silently() {
        let mut debouncer = Debouncer::new(250);
        debouncer.schedule();
        debouncer.schedule();
        debouncer.flush();
        assert!(!debouncer.on_timer());
        assert!(!debouncer.on_timer());
    }

    #[test]
    fn stray_timer_is_ignored() {
        let mut debouncer = Debouncer::new(100);
        assert!(!debouncer.on_timer());
    }
}
