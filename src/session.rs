//! Module implementing a keyed session store with TTL eviction.
//!
//! Conversational frontends (the Telegram bot flow in particular) keep
//! per-chat editing state between messages. The store is independent of
//! the rendering core: it is generic over both the key (chat ID) and the
//! state type, and only tracks last-activity timestamps for eviction.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use antidote::Mutex;
use log::debug;


/// Default session time-to-live (30 minutes).
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);


struct Entry<S> {
    state: S,
    last_activity: Instant,
}

/// A thread-safe store of per-conversation state, keyed by e.g. chat ID.
///
/// Every read or write of a session refreshes its last-activity time.
/// Expired sessions are removed by `evict_expired`, which the owner is
/// expected to call periodically; a fresh default state transparently
/// replaces anything that is gone.
pub struct SessionStore<K: Eq + Hash, S> {
    inner: Mutex<HashMap<K, Entry<S>>>,
    ttl: Duration,
}

impl<K: Eq + Hash, S> SessionStore<K, S> {
    /// Create a store with the default 30-minute TTL.
    #[inline]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }

    /// Create a store with a custom session TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        SessionStore {
            inner: Mutex::new(HashMap::new()),
            ttl,
        }
    }
}

impl<K: Eq + Hash, S> Default for SessionStore<K, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> SessionStore<K, S>
    where K: Eq + Hash, S: Clone + Default
{
    /// Get the session state under given key, creating a default one
    /// if it doesn't exist (or has expired in the meantime).
    pub fn get_or_default(&self, key: K) -> S {
        let mut sessions = self.inner.lock();
        let entry = sessions.entry(key).or_insert_with(|| Entry {
            state: S::default(),
            last_activity: Instant::now(),
        });
        entry.last_activity = Instant::now();
        entry.state.clone()
    }

    /// Get the session state under given key, if present.
    pub fn get(&self, key: &K) -> Option<S> {
        let mut sessions = self.inner.lock();
        sessions.get_mut(key).map(|entry| {
            entry.last_activity = Instant::now();
            entry.state.clone()
        })
    }

    /// Apply a mutation to the session under given key,
    /// creating a default session first if necessary.
    pub fn update<F: FnOnce(&mut S)>(&self, key: K, f: F) {
        let mut sessions = self.inner.lock();
        let entry = sessions.entry(key).or_insert_with(|| Entry {
            state: S::default(),
            last_activity: Instant::now(),
        });
        f(&mut entry.state);
        entry.last_activity = Instant::now();
    }

    /// Reset the session under given key back to the default state.
    pub fn reset(&self, key: K) {
        self.update(key, |state| *state = S::default());
    }
}

impl<K: Eq + Hash, S> SessionStore<K, S> {
    /// Remove the session under given key, returning its state.
    pub fn remove(&self, key: &K) -> Option<S> {
        self.inner.lock().remove(key).map(|entry| entry.state)
    }

    /// Drop all sessions that have been inactive for longer than the TTL.
    /// Returns the number of sessions evicted.
    pub fn evict_expired(&self) -> usize {
        let mut sessions = self.inner.lock();
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_activity.elapsed() <= self.ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!("Evicted {} expired session(s)", evicted);
        }
        evicted
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the store has no sessions at all.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;
    use super::SessionStore;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct BotSession {
        step: u8,
        prompt: String,
    }

    #[test]
    fn creates_default_session_on_first_access() {
        let store: SessionStore<i64, BotSession> = SessionStore::new();
        assert_eq!(store.get_or_default(42), BotSession::default());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_persists_between_accesses() {
        let store: SessionStore<i64, BotSession> = SessionStore::new();
        store.update(7, |s| {
            s.step = 2;
            s.prompt = "neon city".into();
        });
        let session = store.get(&7).unwrap();
        assert_eq!(session.step, 2);
        assert_eq!(session.prompt, "neon city");
    }

    #[test]
    fn reset_restores_defaults() {
        let store: SessionStore<i64, BotSession> = SessionStore::new();
        store.update(7, |s| s.step = 3);
        store.reset(7);
        assert_eq!(store.get(&7).unwrap(), BotSession::default());
    }

    #[test]
    fn evicts_only_expired_sessions() {
        let store: SessionStore<i64, BotSession> =
            SessionStore::with_ttl(Duration::from_millis(20));
        store.update(1, |s| s.step = 1);
        std::thread::sleep(Duration::from_millis(40));
        store.update(2, |s| s.step = 2);

        assert_eq!(store.evict_expired(), 1);
        assert!(store.get(&1).is_none());
        assert!(store.get(&2).is_some());
    }
}
