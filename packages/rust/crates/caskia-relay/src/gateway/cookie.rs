//! Cookie transport for the session key.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

/// Cookie carrying the session key.
pub const SESSION_COOKIE_NAME: &str = "sessionId";
/// Client-side lifetime of the session cookie (24h). Not enforced server-side.
pub const SESSION_COOKIE_MAX_AGE_SECS: u64 = 24 * 60 * 60;

/// Value of cookie `name` across all `Cookie` headers, if present.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_string())
}

/// `Set-Cookie` value handing a freshly minted session key to the browser.
///
/// Readable from scripts (no `HttpOnly`), scoped to the whole site.
pub fn session_set_cookie(session_key: &str) -> String {
    format!("{SESSION_COOKIE_NAME}={session_key}; Max-Age={SESSION_COOKIE_MAX_AGE_SECS}; Path=/")
}
