//! Newtype wrapper for on-chain WAD fixed-point values.
//!
//! Collateral ratios and watermarks are compared in raw `U256` space and only
//! converted to `Decimal` for display.

use alloy::primitives::U256;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::constants::WAD;

/// WAD-scaled value (18 decimals). Used for collateral ratios and watermarks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Wad(pub U256);

impl Wad {
    pub const ONE: Wad = Wad(U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]));
    pub const ZERO: Wad = Wad(U256::ZERO);

    /// Convert on-chain WAD (U256) to off-chain `Decimal`.
    ///
    /// `None` when the raw value is beyond `Decimal`'s range.
    pub fn to_decimal(self) -> Option<Decimal> {
        let raw = Decimal::from_str(&self.0.to_string()).ok()?;
        raw.checked_div(WAD)
    }

    /// Create from a `U256` that is already WAD-scaled.
    pub fn from_raw(val: U256) -> Self {
        Self(val)
    }

    /// Inner `U256`.
    pub fn raw(self) -> U256 {
        self.0
    }

    /// Raw integer as a base-10 string, as it appears on-chain.
    pub fn raw_string(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Debug for Wad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wad({self})")
    }
}

impl fmt::Display for Wad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_decimal() {
            Some(value) => write!(f, "{}", value.normalize()),
            None => write!(f, "{}e-18", self.0),
        }
    }
}

impl From<U256> for Wad {
    fn from(val: U256) -> Self {
        Self(val)
    }
}

impl From<u128> for Wad {
    fn from(val: u128) -> Self {
        Self(U256::from(val))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_wad_one_is_one() {
        assert_eq!(Wad::ONE.to_decimal(), Some(dec!(1)));
    }

    #[test]
    fn test_wad_zero() {
        assert_eq!(Wad::ZERO.to_decimal(), Some(dec!(0)));
    }

    #[test]
    fn test_wad_collateral_ratio() {
        let ratio = Wad::from(2_516_557_646_144_049_203u128);
        assert_eq!(ratio.to_decimal(), Some(dec!(2.516557646144049203)));
        assert_eq!(ratio.raw_string(), "2516557646144049203");
    }

    #[test]
    fn test_wad_ordering_is_raw() {
        let low = Wad::from(2_200_000_000_000_000_000u128);
        let high = Wad::from(2_500_000_000_000_000_000u128);
        assert!(low < high);
        assert!(Wad::from(2_500_000_000_000_000_001u128) > high);
    }

    #[test]
    fn test_wad_out_of_decimal_range_displays_raw() {
        let huge = Wad(U256::MAX);
        assert_eq!(huge.to_decimal(), None);
        assert_eq!(huge.to_string(), format!("{}e-18", U256::MAX));
    }

    #[test]
    fn test_wad_display() {
        assert_eq!(Wad::from(2_500_000_000_000_000_000u128).to_string(), "2.5");
    }
}
