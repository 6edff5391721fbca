//! Strategy registry resolution across PoolAccountants.

use alloy::eips::BlockId;
use alloy::primitives::Address;
use tracing::debug;

use crate::errors::MonitorError;
use crate::execution::ContractReader;

/// List every strategy managed by `accountants`, concatenated in
/// configuration order with duplicates kept.
///
/// Fail-fast: one accountant read error fails the whole resolution.
pub async fn resolve_strategies<R>(
    reader: &R,
    accountants: &[Address],
    block: BlockId,
) -> Result<Vec<Address>, MonitorError>
where
    R: ContractReader + ?Sized,
{
    let mut strategies = Vec::new();

    for accountant in accountants {
        let listed = reader.list_strategies(*accountant, block).await?;
        debug!(accountant = %accountant, count = listed.len(), "accountant resolved");
        strategies.extend(listed);
    }

    Ok(strategies)
}
