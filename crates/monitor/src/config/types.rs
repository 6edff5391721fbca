use serde::Deserialize;

use crate::constants::DEFAULT_TARGET_PROTOCOL;

// ---------------------------------------------------------------------------
// Top-level aggregate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    pub app: AppConfig,
    pub chain: ChainConfig,
    pub detection: DetectionConfig,
}

// ---------------------------------------------------------------------------
// app.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    #[serde(default = "default_log_file_name")]
    pub file_name: String,
}

fn default_log_file_name() -> String {
    "monitor.log".to_string()
}

// ---------------------------------------------------------------------------
// chain.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub chain_name: String,
    pub poll_interval_seconds: u64,
    pub rpc: RpcConfig,
    pub contracts: ContractsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcConfig {
    pub http_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractsConfig {
    /// Maker Jug (stability fee accumulator).
    pub jug: String,
    /// Vesper PoolAccountants, in the order their strategies are reported.
    pub pool_accountants: Vec<String>,
}

// ---------------------------------------------------------------------------
// detection.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    /// Strategy `NAME()` that puts a strategy in scope.
    #[serde(default = "default_target_protocol")]
    pub target_protocol: String,
    /// Hex override of the `drip(bytes32)` selector; defaults to the ABI selector.
    #[serde(default)]
    pub drip_selector: Option<String>,
    #[serde(default)]
    pub known_set_refresh: KnownSetRefresh,
    /// Feed each new block's transactions to the stability fee detector.
    #[serde(default = "default_true")]
    pub scan_transactions: bool,
}

fn default_target_protocol() -> String {
    DEFAULT_TARGET_PROTOCOL.to_string()
}

fn default_true() -> bool {
    true
}

/// When the detector's known-strategy set is re-read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnownSetRefresh {
    /// Once, when the monitor is built.
    #[default]
    Startup,
    /// After every block cycle.
    EveryBlock,
}

impl std::str::FromStr for KnownSetRefresh {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "startup" => Ok(Self::Startup),
            "every_block" => Ok(Self::EveryBlock),
            other => Err(format!("unknown known_set_refresh policy '{other}'")),
        }
    }
}
