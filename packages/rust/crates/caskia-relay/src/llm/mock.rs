//! Deterministic reply used when no completion API is configured.

use crate::session::{Role, Turn};

/// Echo the most recent user turn of `prompt`, tagged as a mock reply.
pub fn mock_reply(prompt: &[Turn]) -> String {
    let last_user = prompt
        .iter()
        .rev()
        .find(|turn| turn.role == Role::User)
        .map_or("", |turn| turn.content.as_str());
    format!(
        "Hi! I'm CaskIA. You said: \"{last_user}\". (This is a mock reply because GITHUB_API_URL or GITHUB_API_TOKEN is not configured.)"
    )
}
