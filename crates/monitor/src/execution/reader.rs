//! Read-only contract query capability consumed by the monitor core.

use alloy::eips::BlockId;
use alloy::primitives::Address;
use async_trait::async_trait;

use crate::errors::MonitorError;
use crate::types::{CollateralType, StrategyState};

/// Typed on-chain queries the monitor needs, one method per concrete read.
///
/// Every read is pinned to `block`, so a cycle labelled with a block number
/// evaluates that block's state.
///
/// Implemented by [`super::chain_reader::OnChainReader`] against an RPC node,
/// and by in-memory fakes in tests.
#[async_trait]
pub trait ContractReader: Send + Sync {
    /// Ordered list of strategies managed by a PoolAccountant.
    async fn list_strategies(
        &self,
        accountant: Address,
        block: BlockId,
    ) -> Result<Vec<Address>, MonitorError>;

    /// Under-water flag, collateral ratio, watermarks and protocol tag of a strategy.
    async fn strategy_state(
        &self,
        strategy: Address,
        block: BlockId,
    ) -> Result<StrategyState, MonitorError>;

    /// Strategy `NAME()`.
    async fn protocol_tag(
        &self,
        strategy: Address,
        block: BlockId,
    ) -> Result<String, MonitorError>;

    /// Maker `ilk` of the strategy's vault. Only Maker strategies expose it.
    async fn collateral_type(
        &self,
        strategy: Address,
        block: BlockId,
    ) -> Result<CollateralType, MonitorError>;
}
