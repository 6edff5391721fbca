use alloy::primitives::{Address, B256};

use super::wad::Wad;

/// Maker `ilk`: 32-byte collateral type identifier (e.g. `"ETH-C"` right-padded).
pub type CollateralType = B256;

/// Snapshot of one strategy's risk state, read fresh every block cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyState {
    pub address: Address,
    pub is_under_water: bool,
    pub collateral_ratio: Wad,
    /// No ordering against `high_water` is enforced.
    pub low_water: Wad,
    pub high_water: Wad,
    /// Strategy `NAME()`; compared case-sensitively against the target protocol.
    pub protocol_tag: String,
}

impl StrategyState {
    pub fn is_target(&self, target_protocol: &str) -> bool {
        self.protocol_tag == target_protocol
    }
}

/// Detector-side view of a strategy: what it holds and which protocol backs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownStrategy {
    pub address: Address,
    pub collateral_type: CollateralType,
    pub protocol_tag: String,
}

impl KnownStrategy {
    pub fn is_target(&self, target_protocol: &str) -> bool {
        self.protocol_tag == target_protocol
    }
}
