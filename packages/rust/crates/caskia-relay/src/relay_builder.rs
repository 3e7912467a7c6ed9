use std::path::PathBuf;

use anyhow::{Context, Result};
use caskia_relay::{
    DEFAULT_MODEL, DEFAULT_PORT, DEFAULT_PUBLIC_DIR, DEFAULT_SYSTEM_PROMPT,
    DEFAULT_UPSTREAM_TIMEOUT_SECS, Relay, RelayConfig, RuntimeSettings, UpstreamConfig,
};

use crate::resolve::{resolve_bind, resolve_optional_string, resolve_positive_u64, resolve_string};

pub(crate) fn build_relay_config(
    upstream_timeout: Option<u64>,
    runtime_settings: &RuntimeSettings,
) -> RelayConfig {
    let upstream = &runtime_settings.upstream;
    RelayConfig {
        upstream: UpstreamConfig {
            url: resolve_optional_string("GITHUB_API_URL", upstream.url.as_deref()),
            token: resolve_optional_string("GITHUB_API_TOKEN", upstream.token.as_deref()),
            model: resolve_string(None, "GITHUB_MODEL", upstream.model.as_deref(), DEFAULT_MODEL),
            timeout_secs: resolve_positive_u64(
                upstream_timeout,
                "CASKIA_UPSTREAM_TIMEOUT_SECS",
                upstream.timeout_secs,
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
            ),
        },
        system_prompt: resolve_string(
            None,
            "CASKIA_SYSTEM_PROMPT",
            runtime_settings.relay.system_prompt.as_deref(),
            DEFAULT_SYSTEM_PROMPT,
        ),
    }
}

pub(crate) fn build_relay(
    upstream_timeout: Option<u64>,
    runtime_settings: &RuntimeSettings,
) -> Result<Relay> {
    let config = build_relay_config(upstream_timeout, runtime_settings);
    Relay::from_config(&config).context("failed to build completion client")
}

pub(crate) fn resolve_gateway_bind(
    cli_bind: Option<String>,
    runtime_settings: &RuntimeSettings,
) -> String {
    resolve_bind(
        cli_bind,
        runtime_settings.gateway.bind.as_deref(),
        DEFAULT_PORT,
    )
}

/// Static UI directory; a missing directory is served as 404s, not fatal.
pub(crate) fn resolve_public_dir(
    cli_dir: Option<PathBuf>,
    runtime_settings: &RuntimeSettings,
) -> PathBuf {
    let dir = PathBuf::from(resolve_string(
        cli_dir.map(|dir| dir.display().to_string()),
        "CASKIA_PUBLIC_DIR",
        runtime_settings.gateway.public_dir.as_deref(),
        DEFAULT_PUBLIC_DIR,
    ));
    if !dir.is_dir() {
        tracing::warn!(
            public_dir = %dir.display(),
            "public directory not found; browser UI will not be served"
        );
    }
    dir
}
