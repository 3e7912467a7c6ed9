//! Completion client: OpenAI-compatible chat completions over HTTPS.

use std::time::Duration;

use serde::Serialize;

use crate::error::{RelayError, Result};
use crate::session::Turn;

use super::extract::extract_reply;

/// Request body for chat completions.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
}

/// HTTP client for one configured completion endpoint.
///
/// Not `Debug`: it holds the bearer token.
#[derive(Clone)]
pub struct CompletionClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
    model: String,
    timeout_secs: u64,
}

impl CompletionClient {
    /// Build a client with a bounded per-request timeout.
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let timeout_secs = timeout_secs.max(1);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
            model: model.into(),
            timeout_secs,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Send the full prompt and return the extracted reply text.
    ///
    /// A non-2xx answer becomes [`RelayError::Upstream`] carrying status and
    /// body; both are logged here since the caller only ever sees a generic
    /// message.
    pub async fn complete(&self, messages: &[Turn]) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
        };
        let res = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .header("Accept", "application/vnd.github+json")
            .bearer_auth(&self.token)
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                body = %text,
                "completion API returned non-success status"
            );
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }
        let parsed: serde_json::Value = serde_json::from_str(&text).map_err(|error| {
            RelayError::MalformedResponse(format!("{error}; body: {text}"))
        })?;
        Ok(extract_reply(&parsed))
    }
}
