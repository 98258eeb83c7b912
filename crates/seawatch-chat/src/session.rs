//! Session store for the chat front end.
//!
//! Maps opaque session identifiers to last-activity timestamps. Expiry is
//! lazy: a record is removed only when an access finds it older than the
//! timeout. The clock is injected so expiry is deterministic in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::debug;

/// Source of "now" as epoch seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// One session record. The authenticated flag is always true once the
/// record exists; it is kept for parity with the wire-visible session shape.
#[derive(Debug, Clone)]
struct SessionRecord {
    authenticated: bool,
    last_activity: i64,
}

/// Identifier-keyed store of chat sessions with lazy expiry.
///
/// Per-key updates are independent replace-or-delete operations; a single
/// mutex over the map is all the coordination required.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionRecord>>,
    timeout_secs: i64,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Create a store with the given inactivity timeout, on wall-clock time.
    pub fn new(timeout_secs: u64) -> Self {
        Self::with_clock(timeout_secs, Arc::new(SystemClock))
    }

    /// Create a store with an injected clock.
    pub fn with_clock(timeout_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            timeout_secs: timeout_secs as i64,
            clock,
        }
    }

    /// Check whether a session is active.
    ///
    /// Side effects: refreshes last-activity when valid; removes the record
    /// when found expired. A record is expired when the elapsed time is
    /// strictly greater than the timeout.
    pub fn is_valid(&self, id: &str) -> bool {
        let Ok(mut sessions) = self.sessions.lock() else {
            return false;
        };
        let now = self.clock.now();

        match sessions.get_mut(id) {
            None => false,
            Some(record) => {
                if now - record.last_activity > self.timeout_secs {
                    sessions.remove(id);
                    debug!(session_id = %id, "Session expired");
                    false
                } else {
                    record.last_activity = now;
                    true
                }
            }
        }
    }

    /// Ensure a fresh session exists for `id`, creating or recreating it
    /// when absent or expired. Returns true when a new record was created.
    pub fn get_or_create(&self, id: &str) -> bool {
        if self.is_valid(id) {
            return false;
        }
        let Ok(mut sessions) = self.sessions.lock() else {
            return false;
        };
        sessions.insert(
            id.to_string(),
            SessionRecord {
                authenticated: true,
                last_activity: self.clock.now(),
            },
        );
        debug!(session_id = %id, "Session created");
        true
    }

    /// Number of records currently held (including not-yet-swept expired ones).
    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Test clock advanced manually.
    struct ManualClock(AtomicI64);

    impl ManualClock {
        fn at(secs: i64) -> Arc<Self> {
            Arc::new(Self(AtomicI64::new(secs)))
        }

        fn advance(&self, secs: i64) {
            self.0.fetch_add(secs, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn store_with_clock() -> (SessionStore, Arc<ManualClock>) {
        let clock = ManualClock::at(1_000_000);
        let store = SessionStore::with_clock(1800, Arc::clone(&clock) as Arc<dyn Clock>);
        (store, clock)
    }

    #[test]
    fn test_unknown_session_is_invalid() {
        let (store, _clock) = store_with_clock();
        assert!(!store.is_valid("nobody"));
    }

    #[test]
    fn test_create_then_valid() {
        let (store, _clock) = store_with_clock();
        assert!(store.get_or_create("s1"));
        assert!(store.is_valid("s1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_valid_at_exactly_timeout_boundary() {
        let (store, clock) = store_with_clock();
        store.get_or_create("s1");
        clock.advance(1800);
        // Elapsed == timeout is not strictly greater: still valid.
        assert!(store.is_valid("s1"));
    }

    #[test]
    fn test_invalid_one_second_past_timeout() {
        let (store, clock) = store_with_clock();
        store.get_or_create("s1");
        clock.advance(1801);
        assert!(!store.is_valid("s1"));
        // The expired record was removed, not just rejected.
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_valid_access_refreshes_activity() {
        let (store, clock) = store_with_clock();
        store.get_or_create("s1");
        clock.advance(1000);
        assert!(store.is_valid("s1")); // refresh at +1000
        clock.advance(1000);
        // Only 1000s since the refresh: still valid.
        assert!(store.is_valid("s1"));
    }

    #[test]
    fn test_expired_session_is_recreated() {
        let (store, clock) = store_with_clock();
        assert!(store.get_or_create("s1"));
        clock.advance(4000);
        // Expired: get_or_create makes a fresh record.
        assert!(store.get_or_create("s1"));
        assert!(store.is_valid("s1"));
    }

    #[test]
    fn test_get_or_create_on_live_session_does_not_recreate() {
        let (store, clock) = store_with_clock();
        assert!(store.get_or_create("s1"));
        clock.advance(10);
        assert!(!store.get_or_create("s1"));
    }

    #[test]
    fn test_sessions_are_independent() {
        let (store, clock) = store_with_clock();
        store.get_or_create("old");
        clock.advance(1700);
        store.get_or_create("new");
        clock.advance(200);
        // "old" is 1900s stale, "new" only 200s.
        assert!(!store.is_valid("old"));
        assert!(store.is_valid("new"));
    }

    #[test]
    fn test_record_is_authenticated_once_created() {
        let (store, _clock) = store_with_clock();
        store.get_or_create("s1");
        let sessions = store.sessions.lock().unwrap();
        assert!(sessions.get("s1").unwrap().authenticated);
    }
}
