//! Completion backends: a real completion API, or the deterministic mock.

mod client;
mod extract;
mod mock;

pub use client::CompletionClient;
pub use extract::{
    REPLY_EXTRACTORS, ReplyExtractor, choice_message_content, extract_reply, output_text,
    result_field,
};
pub use mock::mock_reply;

use crate::config::UpstreamConfig;
use crate::error::Result;
use crate::observability::ExchangeEvent;
use crate::session::Turn;

/// Where replies come from.
///
/// `Mock` is the configured-absence branch, not an error: its replies enter
/// the conversation history exactly like real ones.
#[derive(Clone)]
pub enum CompletionBackend {
    Remote(CompletionClient),
    Mock,
}

impl CompletionBackend {
    /// `Remote` when URL and token are both set, `Mock` otherwise.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        let Some((url, token)) = config.credentials() else {
            tracing::warn!(
                "GITHUB_API_URL or GITHUB_API_TOKEN not configured; serving mock replies"
            );
            return Ok(Self::Mock);
        };
        let client = CompletionClient::new(url, token, config.model.clone(), config.timeout_secs)?;
        tracing::info!(
            endpoint = url,
            model = %config.model,
            timeout_secs = client.timeout_secs(),
            "completion backend enabled"
        );
        Ok(Self::Remote(client))
    }

    /// Produce a reply for the assembled prompt.
    pub async fn reply(&self, prompt: &[Turn]) -> Result<String> {
        match self {
            Self::Remote(client) => client.complete(prompt).await,
            Self::Mock => {
                tracing::debug!(
                    event = ExchangeEvent::MockReplyServed.as_str(),
                    prompt_turns = prompt.len(),
                    "serving mock reply"
                );
                Ok(mock_reply(prompt))
            }
        }
    }

    /// `"remote"` or `"mock"`, for health output and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Remote(_) => "remote",
            Self::Mock => "mock",
        }
    }

    pub fn model(&self) -> Option<&str> {
        match self {
            Self::Remote(client) => Some(client.model()),
            Self::Mock => None,
        }
    }

    pub fn timeout_secs(&self) -> Option<u64> {
        match self {
            Self::Remote(client) => Some(client.timeout_secs()),
            Self::Mock => None,
        }
    }
}
