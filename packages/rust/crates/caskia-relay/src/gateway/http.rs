//! HTTP gateway: POST /api/chat → relay exchange → JSON reply.
//!
//! Validation failures answer 400 with a descriptive body. Every other failure,
//! panics included, answers 500 `{"error": "internal error"}`; the detail only
//! goes to the server log. All other GET paths serve the browser UI.

use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use caskia_format::format_for_display;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;

use super::cookie::{SESSION_COOKIE_NAME, cookie_value, session_set_cookie};
use crate::error::{INTERNAL_ERROR, RelayError};
use crate::observability::{ExchangeEvent, SessionEvent};
use crate::relay::Relay;
use crate::session::SessionKey;

/// Caller-visible body for a bad `POST /api/format`.
pub const TEXT_REQUIRED: &str = "text is required";

/// Response body for a successful exchange.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Response body for every failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response body for `POST /api/format`.
#[derive(Debug, Serialize, Deserialize)]
pub struct FormatResponse {
    pub html: String,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct GatewayHealthResponse {
    pub status: &'static str,
    /// `remote` or `mock`.
    pub upstream: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_timeout_secs: Option<u64>,
    pub sessions: usize,
}

/// Shared state for the HTTP server.
#[derive(Clone)]
pub struct GatewayState {
    pub relay: Arc<Relay>,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        error_response(status, self.public_message())
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn string_field(body: &[u8], field: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value.get(field)?.as_str().map(ToString::to_string)
}

/// Extract and validate `message` from a raw `POST /api/chat` body.
///
/// Non-JSON bodies, a missing or non-string `message`, and empty messages all
/// fail with [`RelayError::InvalidRequest`].
pub fn parse_chat_request(body: &[u8]) -> crate::error::Result<String> {
    let message = string_field(body, "message").ok_or_else(RelayError::message_required)?;
    Relay::validate_message(&message)?;
    Ok(message)
}

async fn handle_chat(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let existing = cookie_value(&headers, SESSION_COOKIE_NAME);
    let (session_key, minted) = SessionKey::resolve(existing.as_deref());
    if minted {
        tracing::debug!(
            event = SessionEvent::SessionKeyMinted.as_str(),
            session_key = %session_key,
            "session key minted"
        );
    }

    let outcome = match parse_chat_request(&body) {
        Ok(message) => state.relay.exchange(&session_key, &message).await,
        Err(error) => Err(error),
    };
    let mut response = match outcome {
        Ok(reply) => Json(ChatResponse { reply }).into_response(),
        Err(error) => {
            log_exchange_failure(&session_key, &error);
            error.into_response()
        }
    };
    if minted {
        attach_session_cookie(&mut response, &session_key);
    }
    response
}

fn log_exchange_failure(session_key: &SessionKey, error: &RelayError) {
    if error.is_client_error() {
        tracing::warn!(
            event = ExchangeEvent::ExchangeRejected.as_str(),
            session_key = %session_key,
            error = %error,
            "chat request rejected"
        );
    } else {
        tracing::error!(
            event = ExchangeEvent::ExchangeFailed.as_str(),
            session_key = %session_key,
            error = %error,
            "chat exchange failed"
        );
    }
}

fn attach_session_cookie(response: &mut Response, session_key: &SessionKey) {
    match HeaderValue::from_str(&session_set_cookie(session_key.as_str())) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Err(error) => {
            tracing::error!(
                session_key = %session_key,
                error = %error,
                "session key is not a valid cookie value"
            );
        }
    }
}

async fn handle_format(body: Bytes) -> Response {
    match string_field(&body, "text") {
        Some(text) => Json(FormatResponse {
            html: format_for_display(&text),
        })
        .into_response(),
        None => error_response(StatusCode::BAD_REQUEST, TEXT_REQUIRED),
    }
}

async fn handle_health(State(state): State<GatewayState>) -> Response {
    let backend = state.relay.backend();
    match state.relay.session_count().await {
        Ok(sessions) => Json(GatewayHealthResponse {
            status: "healthy",
            upstream: backend.label(),
            model: backend.model().map(ToString::to_string),
            upstream_timeout_secs: backend.timeout_secs(),
            sessions,
        })
        .into_response(),
        Err(error) => {
            tracing::error!(error = %error, "health check failed to read session store");
            error.into_response()
        }
    }
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    tracing::error!(panic = detail, "request handler panicked");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
}

/// Build the gateway router.
///
/// Routes: `GET /health`, `POST /api/chat`, `POST /api/format`; everything
/// else is served from `public_dir` when given (404 otherwise).
pub fn router(relay: Relay, public_dir: Option<PathBuf>) -> Router {
    let state = GatewayState {
        relay: Arc::new(relay),
    };
    let mut app = Router::new()
        .route("/health", get(handle_health))
        .route("/api/chat", post(handle_chat))
        .route("/api/format", post(handle_format));
    if let Some(dir) = public_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }
    app.layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

/// Run the HTTP server; binds to `bind_addr` (e.g. `0.0.0.0:3000`).
/// Graceful shutdown on Ctrl+C (SIGINT) and SIGTERM (Unix); in-flight requests complete before exit.
pub async fn run_http(
    relay: Relay,
    bind_addr: &str,
    public_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let upstream = relay.backend().label();
    let public_dir_label = public_dir
        .as_ref()
        .map_or_else(|| "disabled".to_string(), |dir| dir.display().to_string());
    let app = router(relay, public_dir);
    let listener = TcpListener::bind(bind_addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(
        "CaskIA server listening on http://{} (upstream={}, public_dir={}, Ctrl+C/SIGTERM to stop)",
        local_addr,
        upstream,
        public_dir_label
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(error) => {
                tracing::warn!(error = %error, "failed to listen for SIGTERM; Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %error, "failed to listen for Ctrl+C");
        }
    }
}
