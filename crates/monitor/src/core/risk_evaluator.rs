//! Per-block risk evaluation of Maker strategies.
//!
//! Pure functions: a strategy snapshot in, an ordered list of alerts out.
//! Checks run in a fixed order (under-water, low watermark, high watermark)
//! and the two watermark checks are independent of each other, so a pair
//! configured with `high_water < low_water` can trip both.

use crate::types::{AlertEvent, StrategyState};

/// Evaluate one strategy. Strategies not tagged with `target_protocol` yield nothing.
pub fn evaluate_strategy(state: &StrategyState, target_protocol: &str) -> Vec<AlertEvent> {
    let mut alerts = Vec::new();

    if !state.is_target(target_protocol) {
        return alerts;
    }

    if state.is_under_water {
        alerts.push(AlertEvent::UnderWater {
            strategy: state.address,
        });
    }

    if state.collateral_ratio < state.low_water {
        alerts.push(AlertEvent::LowWaterBreach {
            strategy: state.address,
            ratio: state.collateral_ratio,
            threshold: state.low_water,
        });
    }

    if state.collateral_ratio > state.high_water {
        alerts.push(AlertEvent::HighWaterBreach {
            strategy: state.address,
            ratio: state.collateral_ratio,
            threshold: state.high_water,
        });
    }

    alerts
}

/// Evaluate strategies in order and concatenate their alerts.
pub fn evaluate_all(states: &[StrategyState], target_protocol: &str) -> Vec<AlertEvent> {
    states
        .iter()
        .flat_map(|state| evaluate_strategy(state, target_protocol))
        .collect()
}
