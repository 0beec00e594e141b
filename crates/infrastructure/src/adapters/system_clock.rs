//! System clock adapter

use chrono::{DateTime, Utc};
use lexicon_application::ports::Clock;

/// Clock that reads the system time; stamps exported bundles.
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

/// Clock pinned to one instant, for reproducible exports.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock::new();
        let before = clock.now();
        assert!(clock.now() >= before);
        assert!(before.timestamp() > 0);
    }

    #[test]
    fn test_fixed_clock() {
        let at = Utc.timestamp_opt(1_700_000_000, 0).single().unwrap_or_default();
        assert_eq!(FixedClock(at).now(), at);
    }
}
