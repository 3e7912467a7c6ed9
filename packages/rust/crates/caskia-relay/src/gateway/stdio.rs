//! Stdio gateway: read line from stdin → run relay exchange → print reply.

use anyhow::Result;
use caskia_format::format_for_display;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::relay::Relay;
use crate::session::SessionKey;

/// Default session key when not overridden by flag.
pub const DEFAULT_STDIO_SESSION_ID: &str = "default";

/// Run stdio loop: read lines, run exchange, print reply. Exits on EOF or Ctrl+C.
///
/// * `relay`: the relay instance
/// * `session_id`: session key for the conversation (e.g. from `--session-id`)
/// * `html`: print replies as display HTML instead of raw text
///
/// A failed exchange is reported on stderr and the loop keeps reading.
pub async fn run_stdio(relay: Relay, session_id: String, html: bool) -> Result<()> {
    let session_key = SessionKey::from(session_id.as_str());
    let mut reader = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = reader.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match relay.exchange(&session_key, line).await {
            Ok(reply) if html => println!("{}", format_for_display(&reply)),
            Ok(reply) => println!("{reply}"),
            Err(error) => {
                tracing::error!(session_key = %session_key, error = %error, "stdio exchange failed");
                eprintln!("error: {}", error.public_message());
            }
        }
    }
    Ok(())
}
