//! Host-clock timers
//!
//! The sessions never read a clock themselves; the host passes the current
//! time in milliseconds and timers are polled against it.

/// A repeating timer. Stopped timers never fire.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period_ms: u64,
    next_due: Option<u64>,
}

impl IntervalTimer {
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            next_due: None,
        }
    }

    /// (Re)start; first fires one period after `now_ms`
    pub fn start(&mut self, now_ms: u64) {
        self.next_due = Some(now_ms + self.period_ms);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// True once per elapsed period. Missed periods collapse into one firing.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.next_due {
            Some(due) if now_ms >= due => {
                self.next_due = Some(now_ms + self.period_ms);
                true
            }
            _ => false,
        }
    }
}
