pub mod types;
pub mod validate;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Load and merge all config JSON files into a single [`MonitorConfig`],
/// then apply environment variable overrides and validate.
///
/// Expected directory layout:
/// ```text
/// config/
///   app.json
///   chain.json
///   detection.json
/// ```
///
/// # Environment variable overrides
///
/// | Env Var                          | Config Field                       |
/// |----------------------------------|------------------------------------|
/// | `ETH_RPC_URL_HTTP`               | `chain.rpc.http_url`               |
/// | `MONITOR_POLL_INTERVAL_SECONDS`  | `chain.poll_interval_seconds`      |
/// | `MONITOR_TARGET_PROTOCOL`        | `detection.target_protocol`        |
/// | `MONITOR_KNOWN_SET_REFRESH`      | `detection.known_set_refresh`      |
pub fn load_config(config_dir: &Path) -> Result<MonitorConfig> {
    let read = |name: &str| -> Result<String> {
        let path = config_dir.join(name);
        std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file: {}", path.display()))
    };

    let app: AppConfig = serde_json::from_str(&read("app.json")?).context("parsing app.json")?;

    let chain: ChainConfig =
        serde_json::from_str(&read("chain.json")?).context("parsing chain.json")?;

    let detection: DetectionConfig =
        serde_json::from_str(&read("detection.json")?).context("parsing detection.json")?;

    let mut config = MonitorConfig {
        app,
        chain,
        detection,
    };

    apply_env_overrides(&mut config);
    validate::validate_config(&config)?;

    Ok(config)
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides to the loaded config.
///
/// Only non-empty env vars take effect. Parse failures are skipped and the
/// JSON value remains.
fn apply_env_overrides(config: &mut MonitorConfig) {
    if let Some(val) = env_string("ETH_RPC_URL_HTTP") {
        info!("env override: ETH_RPC_URL_HTTP");
        config.chain.rpc.http_url = val;
    }

    if let Some(val) = env_parse::<u64>("MONITOR_POLL_INTERVAL_SECONDS") {
        info!(val, "env override: MONITOR_POLL_INTERVAL_SECONDS");
        config.chain.poll_interval_seconds = val;
    }

    if let Some(val) = env_string("MONITOR_TARGET_PROTOCOL") {
        info!(%val, "env override: MONITOR_TARGET_PROTOCOL");
        config.detection.target_protocol = val;
    }

    if let Some(val) = env_parse::<KnownSetRefresh>("MONITOR_KNOWN_SET_REFRESH") {
        info!(?val, "env override: MONITOR_KNOWN_SET_REFRESH");
        config.detection.known_set_refresh = val;
    }
}

/// Read a non-empty env var as a `String`.
fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Read a non-empty env var and parse it as `T`.
fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env_string(key).and_then(|v| v.parse().ok())
}
