//! Compile-time ABI definitions for the contracts the monitor reads via Alloy `sol!`.
//!
//! Encoding and decoding errors become compile errors; the generated
//! `*Instance` types back [`super::chain_reader::OnChainReader`].

use alloy::sol;

// ---------------------------------------------------------------------------
// Vesper PoolAccountant
// ---------------------------------------------------------------------------

sol! {
    /// Vesper PoolAccountant: bookkeeping for a pool's strategies.
    #[sol(rpc)]
    interface IPoolAccountant {
        /// Ordered list of strategies managed by this accountant.
        function getStrategies() external view returns (address[] memory);
    }
}

// ---------------------------------------------------------------------------
// Vesper Maker strategy
// ---------------------------------------------------------------------------

sol! {
    /// Maker-backed Vesper strategy. Keeps a vault in a CollateralManager.
    #[sol(rpc)]
    interface IMakerStrategy {
        /// Strategy name; Maker strategies report `"Maker"` here.
        function NAME() external view returns (string memory);

        /// True when the vault's debt exceeds what the strategy can repay.
        function isUnderwater() external view returns (bool);

        /// Collateral ratio below which the strategy rebalances (WAD).
        function lowWater() external view returns (uint256);

        /// Collateral ratio above which the strategy rebalances (WAD).
        function highWater() external view returns (uint256);

        /// Maker `ilk` of the vault.
        function collateralType() external view returns (bytes32);

        /// CollateralManager holding the strategy's vault.
        function cm() external view returns (address);
    }
}

// ---------------------------------------------------------------------------
// Vesper CollateralManager
// ---------------------------------------------------------------------------

sol! {
    /// Vesper CollateralManager: wraps Maker vault accounting per owner.
    #[sol(rpc)]
    interface ICollateralManager {
        function getVaultInfo(address vaultOwner) external view returns (
            uint256 collateralLocked,
            uint256 daiDebt,
            uint256 collateralUsdRate,
            uint256 collateralRatio,
            uint256 minimumDebt
        );
    }
}

// ---------------------------------------------------------------------------
// Maker Jug
// ---------------------------------------------------------------------------

sol! {
    /// Maker Jug: stability fee accumulator.
    #[sol(rpc)]
    interface IJug {
        /// Accrue the stability fee for `ilk` and update its rate.
        function drip(bytes32 ilk) external returns (uint256 rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{b256, FixedBytes};
    use alloy::sol_types::SolCall;

    #[test]
    fn test_drip_calldata_layout() {
        let ilk = b256!("4554482d43000000000000000000000000000000000000000000000000000000");
        let data = IJug::dripCall { ilk }.abi_encode();
        // selector + one 32-byte word
        assert_eq!(data.len(), 36);
        assert_eq!(&data[..4], &IJug::dripCall::SELECTOR);
        assert_eq!(&data[4..], ilk.as_slice());
    }

    #[test]
    fn test_drip_roundtrip() {
        let ilk: FixedBytes<32> =
            b256!("5753544554482d41000000000000000000000000000000000000000000000000");
        let data = IJug::dripCall { ilk }.abi_encode();
        let decoded = IJug::dripCall::abi_decode(&data).unwrap();
        assert_eq!(decoded.ilk, ilk);
    }
}
