use alloy::primitives::{address, Address};
use alloy::sol_types::SolCall;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::execution::contracts::IJug;

// ---------------------------------------------------------------------------
// Numeric Constants
// ---------------------------------------------------------------------------

/// WAD: 1e18, fixed-point scale of collateral ratios and watermarks.
pub const WAD: Decimal = dec!(1_000_000_000_000_000_000);

// ---------------------------------------------------------------------------
// Maker (MCD) Mainnet Addresses
// ---------------------------------------------------------------------------

/// MCD Jug: accrues stability fees per collateral type via `drip(ilk)`.
pub const MCD_JUG: Address = address!("19c0976f590D67707E62397C87829d896Dc0f1F1");

/// Selector of `Jug.drip(bytes32)`.
pub const JUG_DRIP_SELECTOR: [u8; 4] = <IJug::dripCall as SolCall>::SELECTOR;

// ---------------------------------------------------------------------------
// Findings
// ---------------------------------------------------------------------------

/// Strategy `NAME()` tag identifying Maker-backed strategies.
pub const DEFAULT_TARGET_PROTOCOL: &str = "Maker";

/// Protocol label attached to every finding.
pub const FINDING_PROTOCOL: &str = "Vesper";

pub const ALERT_ID_UNDER_WATER: &str = "Vesper-1-1";
pub const ALERT_ID_WATERMARK: &str = "Vesper-1-2";
pub const ALERT_ID_STABILITY_FEE: &str = "Vesper-1-3";
