//! Alloy-backed [`ContractReader`]: typed reads against Vesper and Maker contracts.
//!
//! Every read is an `eth_call` pinned to the caller's block through
//! `sol!`-generated bindings; RPC or decoding failures map to
//! [`MonitorError::ReadFailed`] naming the contract and method.

use alloy::eips::BlockId;
use alloy::primitives::Address;
use alloy::providers::RootProvider;
use async_trait::async_trait;
use tracing::debug;

use crate::errors::MonitorError;
use crate::types::{CollateralType, StrategyState, Wad};

use super::contracts::{ICollateralManager, IMakerStrategy, IPoolAccountant};
use super::reader::ContractReader;

/// Concrete provider type: Alloy HTTP provider over Ethereum network.
pub type HttpProvider = RootProvider;

/// Reads strategy registries and Maker strategy state over JSON-RPC.
///
/// Accepts an Alloy HTTP provider via dependency injection so the same
/// connection can be shared with the block poller.
#[derive(Clone)]
pub struct OnChainReader {
    provider: HttpProvider,
}

impl OnChainReader {
    pub fn new(provider: HttpProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ContractReader for OnChainReader {
    async fn list_strategies(
        &self,
        accountant: Address,
        block: BlockId,
    ) -> Result<Vec<Address>, MonitorError> {
        let contract = IPoolAccountant::new(accountant, self.provider.clone());
        let strategies = contract
            .getStrategies()
            .block(block)
            .call()
            .await
            .map_err(|e| MonitorError::read_failed(accountant, "getStrategies", e))?;

        debug!(
            accountant = %accountant,
            block = ?block,
            count = strategies.len(),
            "strategies listed"
        );
        Ok(strategies)
    }

    async fn strategy_state(
        &self,
        strategy: Address,
        block: BlockId,
    ) -> Result<StrategyState, MonitorError> {
        let contract = IMakerStrategy::new(strategy, self.provider.clone());

        let name = contract.NAME().block(block);
        let under_water = contract.isUnderwater().block(block);
        let low_water = contract.lowWater().block(block);
        let high_water = contract.highWater().block(block);
        let cm = contract.cm().block(block);

        let (protocol_tag, is_under_water, low_water, high_water, cm) = tokio::try_join!(
            async {
                name.call()
                    .await
                    .map_err(|e| MonitorError::read_failed(strategy, "NAME", e))
            },
            async {
                under_water
                    .call()
                    .await
                    .map_err(|e| MonitorError::read_failed(strategy, "isUnderwater", e))
            },
            async {
                low_water
                    .call()
                    .await
                    .map_err(|e| MonitorError::read_failed(strategy, "lowWater", e))
            },
            async {
                high_water
                    .call()
                    .await
                    .map_err(|e| MonitorError::read_failed(strategy, "highWater", e))
            },
            async {
                cm.call()
                    .await
                    .map_err(|e| MonitorError::read_failed(strategy, "cm", e))
            },
        )?;

        // The ratio lives on the collateral manager, keyed by vault owner.
        let vault = ICollateralManager::new(cm, self.provider.clone())
            .getVaultInfo(strategy)
            .block(block)
            .call()
            .await
            .map_err(|e| MonitorError::read_failed(cm, "getVaultInfo", e))?;

        let state = StrategyState {
            address: strategy,
            is_under_water,
            collateral_ratio: Wad::from_raw(vault.collateralRatio),
            low_water: Wad::from_raw(low_water),
            high_water: Wad::from_raw(high_water),
            protocol_tag,
        };

        debug!(
            strategy = %strategy,
            block = ?block,
            tag = %state.protocol_tag,
            under_water = state.is_under_water,
            ratio = %state.collateral_ratio,
            low_water = %state.low_water,
            high_water = %state.high_water,
            "strategy state"
        );

        Ok(state)
    }

    async fn protocol_tag(
        &self,
        strategy: Address,
        block: BlockId,
    ) -> Result<String, MonitorError> {
        IMakerStrategy::new(strategy, self.provider.clone())
            .NAME()
            .block(block)
            .call()
            .await
            .map_err(|e| MonitorError::read_failed(strategy, "NAME", e))
    }

    async fn collateral_type(
        &self,
        strategy: Address,
        block: BlockId,
    ) -> Result<CollateralType, MonitorError> {
        IMakerStrategy::new(strategy, self.provider.clone())
            .collateralType()
            .block(block)
            .call()
            .await
            .map_err(|e| MonitorError::read_failed(strategy, "collateralType", e))
    }
}
