//! Timestamps for `createdAt` / `updatedAt` / activity entries.
//!
//! RFC 3339 UTC with milliseconds and a `Z` suffix. Mutations take the time
//! from an injected clock so tests stay deterministic.

use chrono::{SecondsFormat, Utc};

pub trait Clock {
    fn now_rfc3339(&self) -> String;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_rfc3339(&self) -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Always returns the same instant.
#[derive(Clone, Debug)]
pub struct FixedClock(pub String);

impl FixedClock {
    pub fn new(at: impl Into<String>) -> Self {
        Self(at.into())
    }
}

impl Clock for FixedClock {
    fn now_rfc3339(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_utc_millis() {
        let s = SystemClock.now_rfc3339();
        assert!(s.ends_with('Z'));
        assert_eq!(s.len(), "2025-01-01T00:00:00.000Z".len());
        assert!(chrono::DateTime::parse_from_rfc3339(&s).is_ok());
    }
}
