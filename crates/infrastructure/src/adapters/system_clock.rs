//! System clock adapter

use authcheck_application::ports::Clock;
use chrono::{DateTime, Utc};

/// Wall clock; feeds the millisecond stamps in generated emails.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(first.timestamp_millis() > 0);
        assert!(second >= first);
    }
}
