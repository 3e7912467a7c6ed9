use std::path::PathBuf;

use caskia_relay::{RuntimeSettings, run_http};

use crate::relay_builder::{build_relay, resolve_gateway_bind, resolve_public_dir};

pub(crate) async fn run_gateway_mode(
    bind_addr: Option<String>,
    public_dir: Option<PathBuf>,
    upstream_timeout: Option<u64>,
    runtime_settings: &RuntimeSettings,
) -> anyhow::Result<()> {
    let relay = build_relay(upstream_timeout, runtime_settings)?;
    let bind_addr = resolve_gateway_bind(bind_addr, runtime_settings);
    let public_dir = resolve_public_dir(public_dir, runtime_settings);
    run_http(relay, &bind_addr, Some(public_dir)).await
}
