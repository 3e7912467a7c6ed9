//! Gateway namespace: HTTP and stdio entrypoints.

mod cookie;
mod http;
mod stdio;

pub use cookie::{SESSION_COOKIE_MAX_AGE_SECS, SESSION_COOKIE_NAME, cookie_value, session_set_cookie};
pub use http::{
    ChatResponse, ErrorResponse, FormatResponse, GatewayHealthResponse, GatewayState,
    TEXT_REQUIRED, parse_chat_request, router, run_http,
};
pub use stdio::{DEFAULT_STDIO_SESSION_ID, run_stdio};
