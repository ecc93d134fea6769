//! Bounded activity log: newest first, at most `ACTIVITY_CAP` entries.

use std::collections::VecDeque;

use serde::Serialize;

pub const ACTIVITY_CAP: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub at: String,
    pub action: String,
    pub detail: String,
}

#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
}

impl ActivityLog {
    pub fn record(&mut self, at: impl Into<String>, action: impl Into<String>, detail: impl Into<String>) {
        self.entries.push_front(ActivityEntry { at: at.into(), action: action.into(), detail: detail.into() });
        self.entries.truncate(ACTIVITY_CAP);
    }

    /// Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&ActivityEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_twenty_newest_first() {
        let mut log = ActivityLog::default();
        for i in 0..25 {
            log.record(format!("t{i}"), "Edit role", format!("r{i}"));
        }
        assert_eq!(log.len(), ACTIVITY_CAP);
        assert_eq!(log.latest().map(|e| e.detail.as_str()), Some("r24"));
        assert_eq!(log.entries().last().map(|e| e.detail.as_str()), Some("r5"));
    }
}
