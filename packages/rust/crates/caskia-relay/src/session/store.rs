//! Session store: session key → ordered turns.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::observability::SessionEvent;

use super::turn::Turn;

/// Storage seam for conversation history.
///
/// The relay only reads a session's full history and appends single turns, so
/// an external store has to provide nothing more than these calls.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Copy of the history for `session_key`; empty when the session is unknown.
    async fn get(&self, session_key: &str) -> Result<Vec<Turn>>;

    /// Append one turn, creating the session on first use.
    async fn append(&self, session_key: &str, turn: Turn) -> Result<()>;

    /// Number of sessions currently held.
    async fn session_count(&self) -> Result<usize>;
}

/// Process-lifetime store. Sessions are never evicted.
///
/// Two in-flight exchanges on the same key may interleave their appends; each
/// append is atomic on its own.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    inner: Arc<RwLock<HashMap<String, Vec<Turn>>>>,
}

impl InMemorySessionStore {
    /// Create a new empty session store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_key: &str) -> Result<Vec<Turn>> {
        let g = self.inner.read().await;
        let turns = g.get(session_key).cloned().unwrap_or_default();
        tracing::debug!(
            event = SessionEvent::SessionTurnsLoaded.as_str(),
            session_key,
            loaded_turns = turns.len(),
            backend = "memory",
            "session turns loaded"
        );
        Ok(turns)
    }

    async fn append(&self, session_key: &str, turn: Turn) -> Result<()> {
        let mut g = self.inner.write().await;
        if !g.contains_key(session_key) {
            tracing::info!(
                event = SessionEvent::SessionCreated.as_str(),
                session_key,
                backend = "memory",
                "session created"
            );
        }
        let entry = g.entry(session_key.to_string()).or_default();
        let role = turn.role.as_str();
        entry.push(turn);
        tracing::debug!(
            event = SessionEvent::SessionTurnAppended.as_str(),
            session_key,
            role,
            total_turns = entry.len(),
            backend = "memory",
            "session turn appended"
        );
        Ok(())
    }

    async fn session_count(&self) -> Result<usize> {
        Ok(self.inner.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_session_is_empty() {
        let store = InMemorySessionStore::new();
        assert!(store.get("missing").await.unwrap().is_empty());
        assert_eq!(store.session_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn appends_keep_order_per_session() {
        let store = InMemorySessionStore::new();
        store.append("a", Turn::user("one")).await.unwrap();
        store.append("b", Turn::user("other")).await.unwrap();
        store.append("a", Turn::assistant("two")).await.unwrap();

        assert_eq!(
            store.get("a").await.unwrap(),
            vec![Turn::user("one"), Turn::assistant("two")]
        );
        assert_eq!(store.get("b").await.unwrap(), vec![Turn::user("other")]);
        assert_eq!(store.session_count().await.unwrap(), 2);
    }
}
