pub(crate) fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn resolve_string(
    cli_value: Option<String>,
    env_name: &str,
    settings_value: Option<&str>,
    default: &str,
) -> String {
    if let Some(value) = cli_value {
        return value;
    }
    if let Ok(value) = std::env::var(env_name)
        && !value.trim().is_empty()
    {
        return value;
    }
    if let Some(value) = settings_value
        && !value.trim().is_empty()
    {
        return value.to_string();
    }
    default.to_string()
}

pub(crate) fn resolve_optional_string(
    env_name: &str,
    settings_value: Option<&str>,
) -> Option<String> {
    non_empty_env(env_name).or_else(|| {
        settings_value
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ToString::to_string)
    })
}

pub(crate) fn resolve_positive_u64(
    cli_value: Option<u64>,
    env_name: &str,
    settings_value: Option<u64>,
    default: u64,
) -> u64 {
    if let Some(value) = cli_value
        && value > 0
    {
        return value;
    }
    if let Some(value) = parse_positive_u64_from_env(env_name) {
        return value;
    }
    if let Some(value) = settings_value
        && value > 0
    {
        return value;
    }
    default
}

/// `--bind` > `PORT` (all interfaces) > `gateway.bind` > `0.0.0.0:<default_port>`.
pub(crate) fn resolve_bind(
    cli_value: Option<String>,
    settings_value: Option<&str>,
    default_port: u16,
) -> String {
    if let Some(value) = cli_value {
        return value;
    }
    if let Some(port) = parse_port_from_env("PORT") {
        return format!("0.0.0.0:{port}");
    }
    if let Some(value) = settings_value
        && !value.trim().is_empty()
    {
        return value.trim().to_string();
    }
    format!("0.0.0.0:{default_port}")
}

fn parse_port_from_env(name: &str) -> Option<u16> {
    let raw = non_empty_env(name)?;
    match raw.parse::<u16>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            tracing::warn!(env_var = %name, value = %raw, "invalid port env value");
            None
        }
    }
}

pub(crate) fn parse_positive_u64_from_env(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            tracing::warn!(env_var = %name, value = %raw, "invalid positive integer env value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNSET: &str = "CASKIA_TEST_SURELY_UNSET_VARIABLE";

    #[test]
    fn cli_value_wins() {
        assert_eq!(
            resolve_string(Some("cli".to_string()), UNSET, Some("yaml"), "default"),
            "cli"
        );
        assert_eq!(resolve_positive_u64(Some(5), UNSET, Some(9), 60), 5);
    }

    #[test]
    fn settings_fill_in_when_env_is_unset() {
        assert_eq!(resolve_string(None, UNSET, Some("yaml"), "default"), "yaml");
        assert_eq!(resolve_positive_u64(None, UNSET, Some(9), 60), 9);
        assert_eq!(
            resolve_optional_string(UNSET, Some(" https://x ")).as_deref(),
            Some("https://x")
        );
    }

    #[test]
    fn blank_or_zero_values_fall_through_to_default() {
        assert_eq!(resolve_string(None, UNSET, Some("  "), "default"), "default");
        assert_eq!(resolve_positive_u64(Some(0), UNSET, Some(0), 60), 60);
        assert_eq!(resolve_optional_string(UNSET, Some("")), None);
    }

    #[test]
    fn explicit_bind_beats_everything() {
        assert_eq!(
            resolve_bind(Some("127.0.0.1:9000".to_string()), Some("0.0.0.0:1"), 3000),
            "127.0.0.1:9000"
        );
    }
}
