//! Relay: one request/response exchange per user message.
//!
//! An exchange is sequential: validate → append user turn → assemble prompt →
//! ask the completion backend → append assistant turn. The backend call is the
//! only suspension point. If it fails the user turn stays recorded and no
//! assistant turn is appended; nothing is rolled back.

mod prompt;

use std::sync::Arc;

pub use prompt::build_prompt;

use crate::config::RelayConfig;
use crate::error::{RelayError, Result};
use crate::llm::CompletionBackend;
use crate::observability::ExchangeEvent;
use crate::session::{InMemorySessionStore, SessionKey, SessionStore, Turn};

/// Per-session conversation relay.
#[derive(Clone)]
pub struct Relay {
    store: Arc<dyn SessionStore>,
    backend: CompletionBackend,
    system_prompt: String,
}

impl Relay {
    pub fn new(
        store: Arc<dyn SessionStore>,
        backend: CompletionBackend,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            store,
            backend,
            system_prompt: system_prompt.into(),
        }
    }

    /// Relay over a fresh in-memory store; mock replies when upstream is unset.
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let backend = CompletionBackend::from_config(&config.upstream)?;
        Ok(Self::new(
            Arc::new(InMemorySessionStore::new()),
            backend,
            config.system_prompt.clone(),
        ))
    }

    /// Reject empty messages. Whitespace counts as content and is relayed as-is.
    pub fn validate_message(message: &str) -> Result<&str> {
        if message.is_empty() {
            return Err(RelayError::message_required());
        }
        Ok(message)
    }

    /// Run one exchange and return the reply.
    pub async fn exchange(&self, session_key: &SessionKey, message: &str) -> Result<String> {
        let message = Self::validate_message(message)?;
        let key = session_key.as_str();

        self.store.append(key, Turn::user(message)).await?;
        let prompt = self.assemble_prompt(session_key).await?;
        let reply = self.backend.reply(&prompt).await?;
        self.store.append(key, Turn::assistant(reply.as_str())).await?;

        tracing::info!(
            event = ExchangeEvent::ExchangeCompleted.as_str(),
            session_key = key,
            backend = self.backend.label(),
            prompt_turns = prompt.len(),
            reply_chars = reply.chars().count(),
            "chat exchange completed"
        );
        Ok(reply)
    }

    /// Prompt that would be sent for `session_key` right now.
    pub async fn assemble_prompt(&self, session_key: &SessionKey) -> Result<Vec<Turn>> {
        let history = self.store.get(session_key.as_str()).await?;
        Ok(build_prompt(&self.system_prompt, history))
    }

    /// Stored turns for `session_key` (no system turn).
    pub async fn history(&self, session_key: &SessionKey) -> Result<Vec<Turn>> {
        self.store.get(session_key.as_str()).await
    }

    pub async fn session_count(&self) -> Result<usize> {
        self.store.session_count().await
    }

    pub fn backend(&self) -> &CompletionBackend {
        &self.backend
    }
}
