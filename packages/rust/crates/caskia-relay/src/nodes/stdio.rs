use caskia_relay::{RuntimeSettings, run_stdio};

use crate::relay_builder::build_relay;

pub(crate) async fn run_stdio_mode(
    session_id: String,
    html: bool,
    runtime_settings: &RuntimeSettings,
) -> anyhow::Result<()> {
    let relay = build_relay(None, runtime_settings)?;
    run_stdio(relay, session_id, html).await
}
