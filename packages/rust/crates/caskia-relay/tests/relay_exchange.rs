//! Relay exchanges against a fake completion API: prompt assembly, reply
//! extraction, and upstream failure handling.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use axum::body::{Body, to_bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use caskia_relay::{
    Relay, RelayConfig, RelayError, Role, SessionKey, UpstreamConfig, router,
};
use serde_json::{Value, json};
use tower::ServiceExt;

#[derive(Clone, Copy)]
enum UpstreamBehavior {
    /// `choices[0].message.content = "reply-<n>"`, n counting from 1.
    NumberedChat,
    Fail(StatusCode),
    Body(&'static str),
    /// Answer like `NumberedChat`, but only after sleeping this long.
    Sleep(Duration),
}

#[derive(Clone)]
struct UpstreamState {
    behavior: UpstreamBehavior,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Value>>>,
    authorizations: Arc<Mutex<Vec<String>>>,
}

async fn handle_completion(
    State(state): State<UpstreamState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let call = state.calls.fetch_add(1, Ordering::SeqCst) + 1;
    state.requests.lock().unwrap().push(body);
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        state.authorizations.lock().unwrap().push(auth.to_string());
    }
    match state.behavior {
        UpstreamBehavior::NumberedChat => Json(json!({
            "choices": [{ "message": { "role": "assistant", "content": format!("reply-{call}") } }]
        }))
        .into_response(),
        UpstreamBehavior::Fail(status) => (status, "upstream exploded: trace-xyz").into_response(),
        UpstreamBehavior::Body(raw) => raw.into_response(),
        UpstreamBehavior::Sleep(delay) => {
            tokio::time::sleep(delay).await;
            Json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "too late" } }]
            }))
            .into_response()
        }
    }
}

struct FakeUpstream {
    url: String,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Value>>>,
    authorizations: Arc<Mutex<Vec<String>>>,
}

async fn spawn_fake_upstream(behavior: UpstreamBehavior) -> Result<Option<FakeUpstream>> {
    let state = UpstreamState {
        behavior,
        calls: Arc::new(AtomicUsize::new(0)),
        requests: Arc::new(Mutex::new(Vec::new())),
        authorizations: Arc::new(Mutex::new(Vec::new())),
    };
    let upstream = FakeUpstream {
        url: String::new(),
        calls: Arc::clone(&state.calls),
        requests: Arc::clone(&state.requests),
        authorizations: Arc::clone(&state.authorizations),
    };
    let app = Router::new()
        .route("/chat/completions", post(handle_completion))
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            eprintln!("skipping relay exchange tests: local socket bind is not permitted");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(Some(FakeUpstream {
        url: format!("http://{addr}/chat/completions"),
        ..upstream
    }))
}

fn remote_relay(url: &str) -> Relay {
    remote_relay_with_timeout(url, 5)
}

fn remote_relay_with_timeout(url: &str, timeout_secs: u64) -> Relay {
    let config = RelayConfig {
        upstream: UpstreamConfig {
            url: Some(url.to_string()),
            token: Some("test-token".to_string()),
            model: "test-model".to_string(),
            timeout_secs,
        },
        system_prompt: "be kind".to_string(),
    };
    Relay::from_config(&config).expect("remote relay")
}

fn roles_and_contents(messages: &Value) -> Vec<(String, String)> {
    messages
        .as_array()
        .expect("messages array")
        .iter()
        .map(|m| {
            (
                m["role"].as_str().unwrap_or_default().to_string(),
                m["content"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

#[tokio::test]
async fn second_prompt_carries_full_history() -> Result<()> {
    let Some(upstream) = spawn_fake_upstream(UpstreamBehavior::NumberedChat).await? else {
        return Ok(());
    };
    let relay = remote_relay(&upstream.url);
    let key = SessionKey::from("s1");

    assert_eq!(relay.exchange(&key, "first").await?, "reply-1");
    assert_eq!(relay.exchange(&key, "second").await?, "reply-2");

    let requests = upstream.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1]["model"], "test-model");
    assert_eq!(
        roles_and_contents(&requests[1]["messages"]),
        vec![
            ("system".to_string(), "be kind".to_string()),
            ("user".to_string(), "first".to_string()),
            ("assistant".to_string(), "reply-1".to_string()),
            ("user".to_string(), "second".to_string()),
        ]
    );
    assert!(
        upstream
            .authorizations
            .lock()
            .unwrap()
            .iter()
            .all(|auth| auth == "Bearer test-token")
    );
    assert_eq!(relay.history(&key).await?.len(), 4);
    Ok(())
}

#[tokio::test]
async fn sessions_do_not_share_history() -> Result<()> {
    let Some(upstream) = spawn_fake_upstream(UpstreamBehavior::NumberedChat).await? else {
        return Ok(());
    };
    let relay = remote_relay(&upstream.url);

    relay.exchange(&SessionKey::from("a"), "from a").await?;
    relay.exchange(&SessionKey::from("b"), "from b").await?;

    let requests = upstream.requests.lock().unwrap().clone();
    assert_eq!(
        roles_and_contents(&requests[1]["messages"]),
        vec![
            ("system".to_string(), "be kind".to_string()),
            ("user".to_string(), "from b".to_string()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn upstream_error_keeps_user_turn_and_skips_assistant_turn() -> Result<()> {
    let Some(upstream) =
        spawn_fake_upstream(UpstreamBehavior::Fail(StatusCode::SERVICE_UNAVAILABLE)).await?
    else {
        return Ok(());
    };
    let relay = remote_relay(&upstream.url);
    let key = SessionKey::from("s-fail");

    let error = relay
        .exchange(&key, "hello")
        .await
        .expect_err("upstream failure");
    match error {
        RelayError::Upstream { status, ref body } => {
            assert_eq!(status, 503);
            assert!(body.contains("trace-xyz"));
        }
        other => panic!("expected upstream error, got {other:?}"),
    }

    let history = relay.history(&key).await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[0].content, "hello");
    Ok(())
}

#[tokio::test]
async fn gateway_hides_upstream_failure_detail() -> Result<()> {
    let Some(upstream) =
        spawn_fake_upstream(UpstreamBehavior::Fail(StatusCode::BAD_GATEWAY)).await?
    else {
        return Ok(());
    };
    let app = router(remote_relay(&upstream.url), None);

    let response = app
        .oneshot(
            Request::post("/api/chat")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"message":"hello"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(payload, json!({ "error": "internal error" }));
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn output_text_shape_is_extracted() -> Result<()> {
    let Some(upstream) =
        spawn_fake_upstream(UpstreamBehavior::Body(r#"{"output_text":"from output_text"}"#))
            .await?
    else {
        return Ok(());
    };
    let relay = remote_relay(&upstream.url);

    let reply = relay.exchange(&SessionKey::from("s"), "hi").await?;

    assert_eq!(reply, "from output_text");
    Ok(())
}

#[tokio::test]
async fn unknown_shape_falls_back_to_serialized_response() -> Result<()> {
    let Some(upstream) = spawn_fake_upstream(UpstreamBehavior::Body(r#"{"foo": "bar"}"#)).await?
    else {
        return Ok(());
    };
    let relay = remote_relay(&upstream.url);
    let key = SessionKey::from("s");

    let reply = relay.exchange(&key, "hi").await?;

    assert_eq!(reply, r#"{"foo":"bar"}"#);
    assert_eq!(relay.history(&key).await?[1].content, r#"{"foo":"bar"}"#);
    Ok(())
}

#[tokio::test]
async fn non_json_success_body_is_an_error() -> Result<()> {
    let Some(upstream) = spawn_fake_upstream(UpstreamBehavior::Body("plain words")).await? else {
        return Ok(());
    };
    let relay = remote_relay(&upstream.url);

    let error = relay
        .exchange(&SessionKey::from("s"), "hi")
        .await
        .expect_err("malformed response");

    assert!(matches!(error, RelayError::MalformedResponse(_)), "{error:?}");
    Ok(())
}

#[tokio::test]
async fn unreachable_upstream_is_a_transport_error() -> Result<()> {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => return Ok(()),
        Err(err) => return Err(err.into()),
    };
    let addr = listener.local_addr()?;
    drop(listener);
    let relay = remote_relay(&format!("http://{addr}/chat/completions"));
    let key = SessionKey::from("s");

    let error = relay.exchange(&key, "hi").await.expect_err("transport");

    assert!(matches!(error, RelayError::Transport(_)), "{error:?}");
    assert_eq!(relay.history(&key).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn slow_upstream_times_out_as_transport_error() -> Result<()> {
    let Some(upstream) =
        spawn_fake_upstream(UpstreamBehavior::Sleep(Duration::from_secs(3))).await?
    else {
        return Ok(());
    };
    let relay = remote_relay_with_timeout(&upstream.url, 1);
    let key = SessionKey::from("slow");

    let started = std::time::Instant::now();
    let error = relay.exchange(&key, "hi").await.expect_err("timeout");

    assert!(
        matches!(&error, RelayError::Transport(inner) if inner.is_timeout()),
        "{error:?}"
    );
    assert!(
        started.elapsed() < Duration::from_millis(2_500),
        "timeout should fire before the upstream answers"
    );
    let history = relay.history(&key).await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].role, Role::User);
    Ok(())
}

#[tokio::test]
async fn gateway_maps_upstream_timeout_to_internal_error() -> Result<()> {
    let Some(upstream) =
        spawn_fake_upstream(UpstreamBehavior::Sleep(Duration::from_secs(3))).await?
    else {
        return Ok(());
    };
    let app = router(remote_relay_with_timeout(&upstream.url, 1), None);

    let response = app
        .oneshot(
            Request::post("/api/chat")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"message":"hello"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(payload, json!({ "error": "internal error" }));
    Ok(())
}

#[tokio::test]
async fn health_reports_remote_model() -> Result<()> {
    let app = router(remote_relay("http://127.0.0.1:9/chat/completions"), None);

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(payload["upstream"], "remote");
    assert_eq!(payload["model"], "test-model");
    assert_eq!(payload["upstream_timeout_secs"], 5);
    Ok(())
}
