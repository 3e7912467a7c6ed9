use std::path::PathBuf;

use clap::{Parser, Subcommand};

use caskia_relay::DEFAULT_STDIO_SESSION_ID;

#[derive(Parser)]
#[command(name = "caskia")]
#[command(about = "CaskIA chat relay: browser gateway, stdio chat, or one-shot reply formatting.")]
pub(crate) struct Cli {
    /// Override config directory (holds `caskia/settings.yaml`).
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run HTTP server (POST /api/chat + browser UI). Default bind: 0.0.0.0:$PORT or 0.0.0.0:3000
    Gateway {
        /// Listen address (e.g. 0.0.0.0:3000)
        #[arg(long)]
        bind: Option<String>,

        /// Directory served for every non-API path (default: public)
        #[arg(long)]
        public_dir: Option<PathBuf>,

        /// Completion API timeout in seconds (default: 60)
        #[arg(long)]
        upstream_timeout: Option<u64>,

        /// Debug-level logs (ignored when RUST_LOG is set)
        #[arg(long, default_value_t = false)]
        verbose: bool,
    },
    /// Read lines from stdin, run an exchange per line, print reply. Exit on EOF or Ctrl+C.
    Stdio {
        /// Session key for the conversation (default: default)
        #[arg(long, default_value = DEFAULT_STDIO_SESSION_ID)]
        session_id: String,

        /// Print replies as display markup instead of raw text
        #[arg(long, default_value_t = false)]
        html: bool,
    },
    /// Format TEXT (or all of stdin) as display markup and print it.
    Format {
        /// Text to format; read from stdin when omitted.
        text: Option<String>,
    },
}
