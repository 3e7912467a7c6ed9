//! Relay configuration: completion endpoint, credential, model, system prompt.

use serde::{Deserialize, Serialize};

/// Model id sent upstream when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Upper bound for one completion API call.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;
/// Listen port when neither `--bind`, `PORT`, nor settings say otherwise.
pub const DEFAULT_PORT: u16 = 3000;
/// Directory holding the browser UI.
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Instruction prepended to every prompt.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are CaskIA, a friendly chat assistant for kids aged 8-14. Use simple language, short sentences, a cheerful tone, avoid adult topics, and ask clarifying questions when helpful. If a user asks about something unsafe, respond with a gentle refusal and suggest a safe alternative.";

/// Completion API settings. Missing URL or token selects the mock reply path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Chat completions endpoint (full URL).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Bearer credential.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Model id (e.g. `gpt-4o-mini`).
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_upstream_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_upstream_timeout_secs() -> u64 {
    DEFAULT_UPSTREAM_TIMEOUT_SECS
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            model: default_model(),
            timeout_secs: default_upstream_timeout_secs(),
        }
    }
}

impl UpstreamConfig {
    /// `(url, token)` when both are present and non-blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let url = non_blank(self.url.as_deref())?;
        let token = non_blank(self.token.as_deref())?;
        Some((url, token))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Everything needed to build a [`crate::Relay`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig::default(),
            system_prompt: default_system_prompt(),
        }
    }
}
