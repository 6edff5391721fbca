//! Per-transaction detection of Maker stability fee updates.
//!
//! A call to `Jug.drip(ilk)` accrues the stability fee of one collateral
//! type. Every known Maker strategy holding a vault of that `ilk` gets an
//! alert. Traces to other contracts, other selectors, or truncated calldata
//! are not matches; they never fail the pass.

use alloy::primitives::Address;
use tracing::trace;

use crate::types::{AlertEvent, CallTrace, CollateralType, KnownStrategy};

/// Decode the `ilk` argument of a `drip(bytes32)` call.
///
/// Returns `None` if the selector differs or the calldata is too short to
/// hold the selector plus one word.
pub fn decode_drip_collateral_type(
    trace: &CallTrace,
    drip_selector: [u8; 4],
) -> Option<CollateralType> {
    if trace.selector()? != drip_selector {
        return None;
    }
    trace.arg_word(0)
}

/// Matches `drip` calls on a configured Jug against the known strategy set.
#[derive(Debug, Clone)]
pub struct StabilityFeeDetector {
    jug: Address,
    drip_selector: [u8; 4],
    target_protocol: String,
}

impl StabilityFeeDetector {
    pub fn new(jug: Address, drip_selector: [u8; 4], target_protocol: impl Into<String>) -> Self {
        Self {
            jug,
            drip_selector,
            target_protocol: target_protocol.into(),
        }
    }

    /// Collateral type accrued by `trace`, if it is a `drip` on the Jug.
    pub fn dripped_collateral_type(&self, trace: &CallTrace) -> Option<CollateralType> {
        if trace.to != self.jug {
            return None;
        }
        decode_drip_collateral_type(trace, self.drip_selector)
    }

    /// Scan one transaction's traces in order.
    ///
    /// Each matching trace makes its own pass over `known`, so two drips of
    /// the same `ilk` alert twice.
    pub fn detect(&self, traces: &[CallTrace], known: &[KnownStrategy]) -> Vec<AlertEvent> {
        let mut alerts = Vec::new();

        for call in traces {
            let Some(collateral_type) = self.dripped_collateral_type(call) else {
                continue;
            };

            trace!(ilk = %collateral_type, "jug drip observed");

            alerts.extend(
                known
                    .iter()
                    .filter(|s| s.is_target(&self.target_protocol))
                    .filter(|s| s.collateral_type == collateral_type)
                    .map(|s| AlertEvent::StabilityFeeChanged {
                        strategy: s.address,
                        collateral_type,
                    }),
            );
        }

        alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{JUG_DRIP_SELECTOR, MCD_JUG};
    use crate::execution::contracts::IJug;
    use alloy::primitives::{address, b256, B256};
    use alloy::sol_types::SolCall;

    const S2: Address = address!("00000000000000000000000000000000000000b2");
    const S3: Address = address!("00000000000000000000000000000000000000b3");
    const S4: Address = address!("00000000000000000000000000000000000000b4");
    const ETH_C: B256 = b256!("4554482d43000000000000000000000000000000000000000000000000000000");
    const BAD_ILK: B256 = b256!("3554482d43000000000000000000000000000000000000000000000000000000");

    fn detector() -> StabilityFeeDetector {
        StabilityFeeDetector::new(MCD_JUG, JUG_DRIP_SELECTOR, "Maker")
    }

    fn known(address: Address, ilk: B256, tag: &str) -> KnownStrategy {
        KnownStrategy {
            address,
            collateral_type: ilk,
            protocol_tag: tag.to_string(),
        }
    }

    fn drip_trace(to: Address, ilk: B256) -> CallTrace {
        CallTrace::new(to, IJug::dripCall { ilk }.abi_encode())
    }

    #[test]
    fn test_drip_alerts_every_matching_strategy_in_order() {
        let set = vec![known(S2, ETH_C, "Maker"), known(S3, ETH_C, "Maker")];
        let alerts = detector().detect(&[drip_trace(MCD_JUG, ETH_C)], &set);
        assert_eq!(
            alerts,
            vec![
                AlertEvent::StabilityFeeChanged { strategy: S2, collateral_type: ETH_C },
                AlertEvent::StabilityFeeChanged { strategy: S3, collateral_type: ETH_C },
            ]
        );
    }

    #[test]
    fn test_unknown_collateral_type_no_alerts() {
        let set = vec![known(S2, ETH_C, "Maker"), known(S3, ETH_C, "Maker")];
        assert!(detector().detect(&[drip_trace(MCD_JUG, BAD_ILK)], &set).is_empty());
    }

    #[test]
    fn test_non_target_strategy_skipped() {
        let set = vec![known(S2, ETH_C, "Maker"), known(S4, ETH_C, "Compound")];
        let alerts = detector().detect(&[drip_trace(MCD_JUG, ETH_C)], &set);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].strategy(), S2);
    }

    #[test]
    fn test_other_contract_ignored() {
        let set = vec![known(S2, ETH_C, "Maker")];
        let other = address!("00000000000000000000000000000000000000ff");
        assert!(detector().detect(&[drip_trace(other, ETH_C)], &set).is_empty());
    }

    #[test]
    fn test_other_selector_ignored() {
        let set = vec![known(S2, ETH_C, "Maker")];
        let mut input = vec![0xde, 0xad, 0xbe, 0xef];
        input.extend_from_slice(ETH_C.as_slice());
        let trace = CallTrace::new(MCD_JUG, input);
        assert!(detector().detect(&[trace], &set).is_empty());
    }

    #[test]
    fn test_truncated_calldata_is_non_match() {
        let set = vec![known(S2, ETH_C, "Maker")];
        let mut input = JUG_DRIP_SELECTOR.to_vec();
        input.extend_from_slice(&ETH_C.as_slice()[..20]);
        let short = CallTrace::new(MCD_JUG, input);
        let selector_only = CallTrace::new(MCD_JUG, JUG_DRIP_SELECTOR.to_vec());
        let empty = CallTrace::new(MCD_JUG, Vec::<u8>::new());

        let traces = [short, selector_only, empty, drip_trace(MCD_JUG, ETH_C)];
        let alerts = detector().detect(&traces, &set);
        // only the well-formed trailing trace matches
        assert_eq!(alerts.len(), 1);
    }

    #[test]
    fn test_each_matching_trace_makes_a_pass() {
        let set = vec![known(S2, ETH_C, "Maker"), known(S3, ETH_C, "Maker")];
        let traces = [drip_trace(MCD_JUG, ETH_C), drip_trace(MCD_JUG, ETH_C)];
        let alerts = detector().detect(&traces, &set);
        let order: Vec<Address> = alerts.iter().map(AlertEvent::strategy).collect();
        assert_eq!(order, vec![S2, S3, S2, S3]);
    }

    #[test]
    fn test_empty_known_set() {
        assert!(detector().detect(&[drip_trace(MCD_JUG, ETH_C)], &[]).is_empty());
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut input = IJug::dripCall { ilk: ETH_C }.abi_encode();
        input.extend_from_slice(&[0u8; 7]);
        let trace = CallTrace::new(MCD_JUG, input);
        assert_eq!(decode_drip_collateral_type(&trace, JUG_DRIP_SELECTOR), Some(ETH_C));
    }
}
