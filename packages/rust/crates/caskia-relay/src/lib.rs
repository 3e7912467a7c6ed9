//! CaskIA relay: per-session chat history in front of an OpenAI-compatible
//! completion API, served over HTTP (with the browser UI) or stdio.
//!
//! - **Session**: keys minted per browser, turns kept in an in-memory store behind [`SessionStore`].
//! - **Relay**: one exchange = validate → record user turn → full-history prompt → completion → record reply.
//! - **Gateway**: `POST /api/chat`, `POST /api/format`, `GET /health`, static UI fallback.

#![allow(missing_docs)]

mod config;
mod error;
mod gateway;
mod llm;
mod observability;
mod relay;
mod session;

pub use config::{
    DEFAULT_MODEL, DEFAULT_PORT, DEFAULT_PUBLIC_DIR, DEFAULT_SYSTEM_PROMPT,
    DEFAULT_UPSTREAM_TIMEOUT_SECS, GatewaySettings, RelayConfig, RelaySettings, RuntimeSettings,
    UpstreamConfig, UpstreamSettings, load_runtime_settings, load_runtime_settings_from_paths,
    runtime_settings_paths, set_config_home_override,
};
pub use error::{INTERNAL_ERROR, MESSAGE_REQUIRED, RelayError, Result};
pub use gateway::{
    ChatResponse, DEFAULT_STDIO_SESSION_ID, ErrorResponse, FormatResponse, GatewayHealthResponse,
    GatewayState, SESSION_COOKIE_MAX_AGE_SECS, SESSION_COOKIE_NAME, TEXT_REQUIRED, cookie_value,
    parse_chat_request, router, run_http, run_stdio, session_set_cookie,
};
pub use llm::{
    CompletionBackend, CompletionClient, REPLY_EXTRACTORS, ReplyExtractor, choice_message_content,
    extract_reply, mock_reply, output_text, result_field,
};
pub use relay::{Relay, build_prompt};
pub use session::{InMemorySessionStore, Role, SessionKey, SessionStore, Turn};
