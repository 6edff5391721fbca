//! Concurrent per-strategy reads that keep source order.
//!
//! Reads fan out with `join_all`, whose output is positional, so results
//! line up with the input addresses no matter which RPC call returns first.

use alloy::eips::BlockId;
use alloy::primitives::Address;
use futures::future::join_all;

use crate::errors::MonitorError;
use crate::execution::ContractReader;
use crate::types::{KnownStrategy, StrategyState};

/// Fetch the risk state of every strategy at `block`, in input order.
///
/// Every strategy is read, whatever its protocol tag; filtering happens in
/// the evaluator. The first failed read (by position) fails the batch.
pub async fn fetch_states<R>(
    reader: &R,
    strategies: &[Address],
    block: BlockId,
) -> Result<Vec<StrategyState>, MonitorError>
where
    R: ContractReader + ?Sized,
{
    let reads = strategies.iter().map(|s| reader.strategy_state(*s, block));
    join_all(reads).await.into_iter().collect()
}

/// Fetch the detector profile of every `target_protocol` strategy, in input order.
///
/// Strategies tagged otherwise are dropped after their `NAME()` read and never
/// asked for a collateral type.
pub async fn fetch_profiles<R>(
    reader: &R,
    strategies: &[Address],
    target_protocol: &str,
    block: BlockId,
) -> Result<Vec<KnownStrategy>, MonitorError>
where
    R: ContractReader + ?Sized,
{
    let reads = strategies
        .iter()
        .map(|s| fetch_profile(reader, *s, target_protocol, block));
    join_all(reads)
        .await
        .into_iter()
        .filter_map(Result::transpose)
        .collect()
}

async fn fetch_profile<R>(
    reader: &R,
    strategy: Address,
    target_protocol: &str,
    block: BlockId,
) -> Result<Option<KnownStrategy>, MonitorError>
where
    R: ContractReader + ?Sized,
{
    let protocol_tag = reader.protocol_tag(strategy, block).await?;
    if protocol_tag != target_protocol {
        return Ok(None);
    }

    let collateral_type = reader.collateral_type(strategy, block).await?;
    Ok(Some(KnownStrategy {
        address: strategy,
        collateral_type,
        protocol_tag,
    }))
}
