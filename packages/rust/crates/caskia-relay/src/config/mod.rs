//! Config namespace: relay config and runtime settings loading.

mod relay;
mod settings;

pub use relay::{
    DEFAULT_MODEL, DEFAULT_PORT, DEFAULT_PUBLIC_DIR, DEFAULT_SYSTEM_PROMPT,
    DEFAULT_UPSTREAM_TIMEOUT_SECS, RelayConfig, UpstreamConfig,
};
pub use settings::{
    GatewaySettings, RelaySettings, RuntimeSettings, UpstreamSettings, load_runtime_settings,
    load_runtime_settings_from_paths, runtime_settings_paths, set_config_home_override,
};
