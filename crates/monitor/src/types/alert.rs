use alloy::primitives::Address;

use super::strategy::CollateralType;
use super::wad::Wad;

/// Internal alert raised by a cycle, before rendering into a [`super::Finding`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertEvent {
    UnderWater {
        strategy: Address,
    },
    LowWaterBreach {
        strategy: Address,
        ratio: Wad,
        threshold: Wad,
    },
    HighWaterBreach {
        strategy: Address,
        ratio: Wad,
        threshold: Wad,
    },
    StabilityFeeChanged {
        strategy: Address,
        collateral_type: CollateralType,
    },
}

impl AlertEvent {
    pub fn strategy(&self) -> Address {
        match self {
            Self::UnderWater { strategy }
            | Self::LowWaterBreach { strategy, .. }
            | Self::HighWaterBreach { strategy, .. }
            | Self::StabilityFeeChanged { strategy, .. } => *strategy,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnderWater { .. } => "under_water",
            Self::LowWaterBreach { .. } => "low_water_breach",
            Self::HighWaterBreach { .. } => "high_water_breach",
            Self::StabilityFeeChanged { .. } => "stability_fee_changed",
        }
    }
}
