use alloy::primitives::Address;
use thiserror::Error;

/// Typed error hierarchy for the strategy monitor.
///
/// A failed read surfaces as `Err` from the cycle that issued it, which keeps
/// it distinguishable from a cycle that ran cleanly and produced no findings.
/// Application code wraps with `anyhow::Context` for propagation.
#[derive(Error, Debug)]
pub enum MonitorError {
    // -- Upstream reads -----------------------------------------------------
    #[error("read {call} on {contract} failed: {reason}")]
    ReadFailed {
        contract: Address,
        call: &'static str,
        reason: String,
    },

    // -- Configuration ------------------------------------------------------
    #[error("configuration error: {0}")]
    Config(String),
}

impl MonitorError {
    /// Shorthand for wrapping a contract-call error with the target and method.
    pub fn read_failed(contract: Address, call: &'static str, err: impl std::fmt::Display) -> Self {
        Self::ReadFailed {
            contract,
            call,
            reason: err.to_string(),
        }
    }
}
