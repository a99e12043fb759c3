//! Most-recent-first view of ledger activity.

/// Default number of entries shown by a recent-activity listing.
pub const DEFAULT_RECENT_COUNT: usize = 5;

/// Stack of transaction identifiers, pushed on every issue and every return.
///
/// Holds identifiers only; the ledger owns the transactions. A transaction
/// that was issued and later returned appears twice.
///
/// The history is unbounded: it grows by one entry per issue or return for
/// the life of the engine, like the ledger it points into. Only the view is
/// bounded, by the `count` passed to [`recent`](Self::recent).
#[derive(Debug, Clone, Default)]
pub struct RecentActivity {
    stack: Vec<String>,
}

impl RecentActivity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a transaction as the most recent activity.
    pub fn record(&mut self, tx_id: &str) {
        self.stack.push(tx_id.to_string());
    }

    /// Up to `count` identifiers, most recent first. Does not consume the history.
    pub fn recent(&self, count: usize) -> Vec<&str> {
        self.stack
            .iter()
            .rev()
            .take(count)
            .map(String::as_str)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_recent_first() {
        let mut activity = RecentActivity::new();
        activity.record("T1001");
        activity.record("T1002");
        activity.record("T1001");

        assert_eq!(activity.recent(5), vec!["T1001", "T1002", "T1001"]);
        assert_eq!(activity.recent(1), vec!["T1001"]);
    }

    #[test]
    fn test_reading_does_not_consume() {
        let mut activity = RecentActivity::new();
        activity.record("T1001");
        activity.record("T1002");

        assert_eq!(activity.recent(2), vec!["T1002", "T1001"]);
        assert_eq!(activity.recent(2), vec!["T1002", "T1001"]);
        assert_eq!(activity.len(), 2);
    }

    #[test]
    fn test_empty_and_zero_count() {
        let mut activity = RecentActivity::new();
        assert!(activity.recent(DEFAULT_RECENT_COUNT).is_empty());

        activity.record("T1001");
        assert!(activity.recent(0).is_empty());
    }

    #[test]
    fn test_history_grows_while_view_stays_bounded() {
        let mut activity = RecentActivity::new();
        for n in 0..1_000 {
            activity.record(&format!("T{}", 1001 + n));
        }

        assert_eq!(activity.len(), 1_000);
        let recent = activity.recent(DEFAULT_RECENT_COUNT);
        assert_eq!(recent.len(), DEFAULT_RECENT_COUNT);
        assert_eq!(recent[0], "T2000");
        assert_eq!(recent[4], "T1996");
        assert_eq!(activity.recent(usize::MAX).len(), 1_000);
    }
}
