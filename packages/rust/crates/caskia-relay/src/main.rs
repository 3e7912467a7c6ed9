//! caskia CLI: gateway, stdio, or format mode.
//!
//! Upstream from `GITHUB_API_URL` / `GITHUB_API_TOKEN` (environment, `.env`, or settings); mock replies when either is missing.
//!
//! Logging: set `RUST_LOG=caskia_relay=info` (or `warn`, `debug`) to see relay logs on stderr.

mod cli;
mod dotenv;
mod nodes;
mod relay_builder;
mod resolve;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use caskia_relay::{load_runtime_settings, set_config_home_override};

use crate::cli::{Cli, Command};
use crate::dotenv::load_dotenv;
use crate::nodes::{run_format_mode, run_gateway_mode, run_stdio_mode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = load_dotenv();
    let cli = Cli::parse();
    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }

    // RUST_LOG overrides; --verbose on gateway => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let verbose = matches!(&cli.command, Command::Gateway { verbose: true, .. });
        EnvFilter::new(if verbose {
            "caskia_relay=debug,caskia=debug"
        } else {
            "caskia_relay=info,caskia=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    dotenv.log();

    let runtime_settings = load_runtime_settings();

    match cli.command {
        Command::Gateway {
            bind,
            public_dir,
            upstream_timeout,
            verbose: _,
        } => run_gateway_mode(bind, public_dir, upstream_timeout, &runtime_settings).await,
        Command::Stdio { session_id, html } => {
            run_stdio_mode(session_id, html, &runtime_settings).await
        }
        Command::Format { text } => run_format_mode(text).await,
    }
}
