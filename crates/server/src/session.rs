//! Session management
//!
//! Each session owns one [`DialogueContext`] behind a tokio mutex so
//! a turn can hold it across the responder's await points. The store
//! is trait-based; the in-memory implementation evicts idle sessions
//! past the configured TTL and, at capacity, the stalest session.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use tokio::sync::Mutex;

use krishi_dialogue::DialogueContext;

/// Shared handle to one session's mutable context.
pub type SharedContext = Arc<Mutex<DialogueContext>>;

/// Pluggable session storage.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the context for `id`, creating a fresh one if absent.
    /// Touches the session's activity clock either way.
    async fn get_or_create(&self, id: &str) -> SharedContext;

    /// Drop a session outright.
    async fn remove(&self, id: &str);

    /// Number of live sessions.
    async fn len(&self) -> usize;
}

struct SessionEntry {
    context: SharedContext,
    last_seen: RwLock<Instant>,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            context: Arc::new(Mutex::new(DialogueContext::new())),
            last_seen: RwLock::new(Instant::now()),
        }
    }

    fn idle_for(&self) -> Duration {
        self.last_seen.read().elapsed()
    }

    fn touch(&self) {
        *self.last_seen.write() = Instant::now();
    }
}

/// In-memory store; sessions never persist across restarts.
pub struct InMemorySessionStore {
    sessions: DashMap<String, SessionEntry>,
    idle_ttl: Duration,
    max_sessions: usize,
}

impl InMemorySessionStore {
    pub fn new(idle_ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_ttl,
            max_sessions,
        }
    }

    /// Drop every session idle longer than the TTL.
    fn sweep_expired(&self) {
        let ttl = self.idle_ttl;
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| entry.idle_for() < ttl);
        let evicted = before - self.sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, "Swept expired sessions");
        }
    }

    /// Drop the session that has been idle longest.
    fn evict_stalest(&self) {
        let stalest = self
            .sessions
            .iter()
            .max_by_key(|entry| entry.idle_for())
            .map(|entry| entry.key().clone());
        if let Some(id) = stalest {
            tracing::warn!(session_id = %id, "Session store at capacity, evicting stalest");
            self.sessions.remove(&id);
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, id: &str) -> SharedContext {
        if let Some(entry) = self.sessions.get(id) {
            entry.touch();
            return entry.context.clone();
        }

        self.sweep_expired();
        if self.sessions.len() >= self.max_sessions {
            self.evict_stalest();
        }

        let entry = self
            .sessions
            .entry(id.to_string())
            .or_insert_with(SessionEntry::new);
        entry.touch();
        entry.context.clone()
    }

    async fn remove(&self, id: &str) {
        self.sessions.remove(id);
    }

    async fn len(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(ttl_ms: u64, max: usize) -> InMemorySessionStore {
        InMemorySessionStore::new(Duration::from_millis(ttl_ms), max)
    }

    #[tokio::test]
    async fn same_id_returns_same_context() {
        let s = store(60_000, 10);
        let a = s.get_or_create("s1").await;
        a.lock().await.awaiting_weather_location = true;

        let b = s.get_or_create("s1").await;
        assert!(b.lock().await.awaiting_weather_location);
        assert_eq!(s.len().await, 1);
    }

    #[tokio::test]
    async fn distinct_ids_are_isolated() {
        let s = store(60_000, 10);
        let a = s.get_or_create("s1").await;
        a.lock().await.awaiting_mandi_info = true;

        let b = s.get_or_create("s2").await;
        assert!(!b.lock().await.awaiting_mandi_info);
        assert_eq!(s.len().await, 2);
    }

    #[tokio::test]
    async fn expired_sessions_are_swept_on_create() {
        let s = store(0, 10);
        s.get_or_create("old").await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        s.get_or_create("new").await;
        assert!(s.sessions.get("old").is_none());
    }

    #[tokio::test]
    async fn capacity_evicts_the_stalest_session() {
        let s = store(60_000, 2);
        s.get_or_create("first").await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        s.get_or_create("second").await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        s.get_or_create("third").await;
        assert_eq!(s.len().await, 2);
        assert!(s.sessions.get("first").is_none());
        assert!(s.sessions.get("second").is_some());
        assert!(s.sessions.get("third").is_some());
    }

    #[tokio::test]
    async fn remove_drops_state() {
        let s = store(60_000, 10);
        let a = s.get_or_create("s1").await;
        a.lock().await.awaiting_weather_location = true;
        s.remove("s1").await;

        let b = s.get_or_create("s1").await;
        assert!(!b.lock().await.awaiting_weather_location);
    }
}
