use anyhow::{bail, Result};

use super::types::MonitorConfig;

/// Validate invariants across the merged config that serde alone cannot enforce.
///
/// Collects every problem before failing. Called automatically by
/// [`super::load_config`].
pub fn validate_config(config: &MonitorConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    validate_chain_config(config, &mut errors);
    validate_detection_config(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        let msg = format!(
            "Configuration validation failed ({} error{}):\n  - {}",
            errors.len(),
            if errors.len() == 1 { "" } else { "s" },
            errors.join("\n  - ")
        );
        bail!("{msg}");
    }
}

// ---------------------------------------------------------------------------
// Chain config
// ---------------------------------------------------------------------------

fn validate_chain_config(config: &MonitorConfig, errors: &mut Vec<String>) {
    let chain = &config.chain;

    if chain.rpc.http_url.is_empty() {
        errors.push("chain.rpc: http_url is empty".into());
    }

    if chain.poll_interval_seconds == 0 {
        errors.push("chain: poll_interval_seconds must be > 0".into());
    }

    if let Err(e) = validate_address(&chain.contracts.jug) {
        errors.push(format!("chain.contracts.jug: {e}"));
    }

    for (i, addr) in chain.contracts.pool_accountants.iter().enumerate() {
        if let Err(e) = validate_address(addr) {
            errors.push(format!("chain.contracts.pool_accountants[{i}]: {e}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Detection config
// ---------------------------------------------------------------------------

fn validate_detection_config(config: &MonitorConfig, errors: &mut Vec<String>) {
    let detection = &config.detection;

    if detection.target_protocol.is_empty() {
        errors.push("detection: target_protocol is empty".into());
    }

    if let Some(selector) = &detection.drip_selector {
        if let Err(e) = parse_selector(selector) {
            errors.push(format!("detection.drip_selector: {e}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_address(addr: &str) -> Result<(), String> {
    if addr.is_empty() {
        return Err("address is empty".into());
    }
    if !addr.starts_with("0x") && !addr.starts_with("0X") {
        return Err(format!("address '{addr}' must start with 0x"));
    }
    if addr.len() != 42 {
        return Err(format!(
            "address '{addr}' has length {} (expected 42)",
            addr.len()
        ));
    }
    if !addr[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("address '{addr}' contains non-hex characters"));
    }
    Ok(())
}

/// Parse a 4-byte function selector written as hex, with or without `0x`.
pub fn parse_selector(selector: &str) -> Result<[u8; 4], String> {
    let digits = selector
        .strip_prefix("0x")
        .or_else(|| selector.strip_prefix("0X"))
        .unwrap_or(selector);
    let bytes = hex::decode(digits).map_err(|e| format!("selector '{selector}' is not hex: {e}"))?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| format!("selector '{selector}' has {} bytes (expected 4)", b.len()))
}
