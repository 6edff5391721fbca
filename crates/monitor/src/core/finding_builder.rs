//! Rendering of internal [`AlertEvent`]s into reported [`Finding`]s.
//!
//! One event becomes exactly one finding; order is preserved. Metadata
//! carries raw on-chain values (WAD integers, checksummed addresses, 0x hex
//! collateral types); descriptions show ratios as decimals.

use std::collections::BTreeMap;

use crate::constants::{
    ALERT_ID_STABILITY_FEE, ALERT_ID_UNDER_WATER, ALERT_ID_WATERMARK, FINDING_PROTOCOL,
};
use crate::types::{AlertEvent, Finding, FindingSeverity, FindingType};

pub fn build_finding(event: &AlertEvent) -> Finding {
    match event {
        AlertEvent::UnderWater { strategy } => Finding {
            name: "Maker Type Strategy isUnderWater Detection".into(),
            description: format!("Maker strategy {strategy} is under water"),
            alert_id: ALERT_ID_UNDER_WATER.into(),
            protocol: FINDING_PROTOCOL.into(),
            severity: FindingSeverity::Critical,
            finding_type: FindingType::Suspicious,
            metadata: BTreeMap::from([("strategy".to_string(), strategy.to_string())]),
        },
        AlertEvent::LowWaterBreach {
            strategy,
            ratio,
            threshold,
        } => Finding {
            name: "Maker Type Strategy Collateral Ratio < lowWater Detection".into(),
            description: format!(
                "Collateral ratio {ratio} of strategy {strategy} is below lowWater {threshold}"
            ),
            alert_id: ALERT_ID_WATERMARK.into(),
            protocol: FINDING_PROTOCOL.into(),
            severity: FindingSeverity::Critical,
            finding_type: FindingType::Suspicious,
            metadata: BTreeMap::from([
                ("strategy".to_string(), strategy.to_string()),
                ("collateralRatio".to_string(), ratio.raw_string()),
                ("lowWater".to_string(), threshold.raw_string()),
            ]),
        },
        AlertEvent::HighWaterBreach {
            strategy,
            ratio,
            threshold,
        } => Finding {
            name: "Maker Type Strategy Collateral Ratio > highWater Detection".into(),
            description: format!(
                "Collateral ratio {ratio} of strategy {strategy} is above highWater {threshold}"
            ),
            alert_id: ALERT_ID_WATERMARK.into(),
            protocol: FINDING_PROTOCOL.into(),
            severity: FindingSeverity::Info,
            finding_type: FindingType::Info,
            metadata: BTreeMap::from([
                ("strategy".to_string(), strategy.to_string()),
                ("collateralRatio".to_string(), ratio.raw_string()),
                ("highWater".to_string(), threshold.raw_string()),
            ]),
        },
        AlertEvent::StabilityFeeChanged {
            strategy,
            collateral_type,
        } => Finding {
            name: "Stability Fee Update Detection".into(),
            description: "stability Fee is changed for related strategy's collateral".into(),
            alert_id: ALERT_ID_STABILITY_FEE.into(),
            protocol: FINDING_PROTOCOL.into(),
            severity: FindingSeverity::High,
            finding_type: FindingType::Info,
            metadata: BTreeMap::from([
                ("strategy".to_string(), strategy.to_string()),
                ("collateralType".to_string(), collateral_type.to_string()),
            ]),
        },
    }
}

pub fn build_findings(events: &[AlertEvent]) -> Vec<Finding> {
    events.iter().map(build_finding).collect()
}
