//! Read request tracking
//!
//! Reads are not serialized: a read issued on mount and a read issued after a
//! creation may resolve in either order. Only the most recently issued read is
//! allowed to replace the snapshot; anything older is discarded when it
//! resolves, whatever it carries.

use std::collections::BTreeSet;
use std::fmt;

/// Identifier of an issued read, increasing with every issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a resolved read should be treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Latest issued read: apply it
    Current,
    /// Superseded by a newer read: discard it
    Stale,
    /// Never issued, already resolved, or dropped by teardown: discard it
    Unknown,
}

/// Issues read tokens and decides which resolutions may update state
#[derive(Debug, Default)]
pub struct ReadTracker {
    last_issued: u64,
    in_flight: BTreeSet<u64>,
    torn_down: bool,
}

impl ReadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token for a new read; it supersedes every earlier one
    pub fn issue(&mut self) -> RequestToken {
        self.last_issued += 1;
        self.in_flight.insert(self.last_issued);
        RequestToken(self.last_issued)
    }

    /// Record that the read behind `token` resolved
    pub fn resolve(&mut self, token: RequestToken) -> Resolution {
        if !self.in_flight.remove(&token.0) {
            return Resolution::Unknown;
        }

        if token.0 == self.last_issued {
            Resolution::Current
        } else {
            Resolution::Stale
        }
    }

    /// Most recently issued token
    pub fn latest(&self) -> Option<RequestToken> {
        (self.last_issued > 0).then_some(RequestToken(self.last_issued))
    }

    /// Whether the latest read is still outstanding
    pub fn is_loading(&self) -> bool {
        self.in_flight.contains(&self.last_issued)
    }

    /// Number of reads issued and not yet resolved, stale ones included
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Forget every outstanding read; nothing resolves as current afterwards
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.in_flight.clear();
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_increase() {
        let mut tracker = ReadTracker::new();
        assert_eq!(tracker.latest(), None);

        let a = tracker.issue();
        let b = tracker.issue();

        assert!(b > a);
        assert_eq!(tracker.latest(), Some(b));
        assert_eq!(tracker.in_flight(), 2);
    }

    #[test]
    fn test_older_read_resolving_last_is_stale() {
        let mut tracker = ReadTracker::new();
        let a = tracker.issue();
        let b = tracker.issue();

        assert_eq!(tracker.resolve(b), Resolution::Current);
        assert_eq!(tracker.resolve(a), Resolution::Stale);
        assert!(!tracker.is_loading());
    }

    #[test]
    fn test_older_read_resolving_first_is_stale() {
        let mut tracker = ReadTracker::new();
        let a = tracker.issue();
        let b = tracker.issue();

        assert_eq!(tracker.resolve(a), Resolution::Stale);
        assert!(tracker.is_loading());
        assert_eq!(tracker.resolve(b), Resolution::Current);
    }

    #[test]
    fn test_double_resolution_is_unknown() {
        let mut tracker = ReadTracker::new();
        let a = tracker.issue();

        assert_eq!(tracker.resolve(a), Resolution::Current);
        assert_eq!(tracker.resolve(a), Resolution::Unknown);
        assert_eq!(tracker.resolve(RequestToken(99)), Resolution::Unknown);
    }

    #[test]
    fn test_teardown_drops_outstanding_reads() {
        let mut tracker = ReadTracker::new();
        let a = tracker.issue();

        tracker.teardown();

        assert!(tracker.is_torn_down());
        assert!(!tracker.is_loading());
        assert_eq!(tracker.resolve(a), Resolution::Unknown);
    }
}
