//! In-memory [`ContractReader`] for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use alloy::eips::{BlockId, BlockNumberOrTag};
use alloy::primitives::{Address, B256};
use async_trait::async_trait;

use crate::errors::MonitorError;
use crate::execution::ContractReader;
use crate::types::{CollateralType, StrategyState, Wad};

#[derive(Default)]
pub struct FakeReader {
    pub accountants: HashMap<Address, Vec<Address>>,
    /// State served for any block without an entry in `block_states`.
    pub states: HashMap<Address, StrategyState>,
    pub block_states: HashMap<(u64, Address), StrategyState>,
    /// Strategies without an entry revert on `collateralType()`.
    pub collateral_types: Mutex<HashMap<Address, B256>>,
    /// Artificial latency per strategy read, to shuffle completion order.
    pub delays: HashMap<Address, Duration>,
    pub state_reads: AtomicUsize,
    pub fail_accountant: Mutex<Option<Address>>,
}

impl FakeReader {
    pub fn with_accountant(mut self, accountant: Address, strategies: Vec<Address>) -> Self {
        self.accountants.insert(accountant, strategies);
        self
    }

    pub fn with_state(mut self, state: StrategyState, ilk: B256) -> Self {
        self.collateral_types.get_mut().unwrap().insert(state.address, ilk);
        self.states.insert(state.address, state);
        self
    }

    /// A strategy that answers `NAME()` but has no `collateralType()` getter.
    pub fn with_tagged_state(mut self, state: StrategyState) -> Self {
        self.states.insert(state.address, state);
        self
    }

    /// Override a strategy's state at one block number.
    pub fn with_state_at(mut self, block: u64, state: StrategyState) -> Self {
        self.block_states.insert((block, state.address), state);
        self
    }

    pub fn with_delay(mut self, strategy: Address, delay: Duration) -> Self {
        self.delays.insert(strategy, delay);
        self
    }

    pub fn set_collateral_type(&self, strategy: Address, ilk: B256) {
        self.collateral_types.lock().unwrap().insert(strategy, ilk);
    }

    pub fn fail_on(&self, accountant: Address) {
        *self.fail_accountant.lock().unwrap() = Some(accountant);
    }

    pub fn recover(&self) {
        *self.fail_accountant.lock().unwrap() = None;
    }

    pub fn state_reads(&self) -> usize {
        self.state_reads.load(Ordering::SeqCst)
    }

    fn state_at(&self, strategy: Address, block: BlockId) -> Option<&StrategyState> {
        let pinned = match block {
            BlockId::Number(BlockNumberOrTag::Number(n)) => self.block_states.get(&(n, strategy)),
            _ => None,
        };
        pinned.or_else(|| self.states.get(&strategy))
    }
}

#[async_trait]
impl ContractReader for FakeReader {
    async fn list_strategies(
        &self,
        accountant: Address,
        _block: BlockId,
    ) -> Result<Vec<Address>, MonitorError> {
        if *self.fail_accountant.lock().unwrap() == Some(accountant) {
            return Err(MonitorError::read_failed(accountant, "getStrategies", "node unavailable"));
        }
        self.accountants.get(&accountant).cloned().ok_or_else(|| {
            MonitorError::read_failed(accountant, "getStrategies", "unknown accountant")
        })
    }

    async fn strategy_state(
        &self,
        strategy: Address,
        block: BlockId,
    ) -> Result<StrategyState, MonitorError> {
        self.state_reads.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&strategy) {
            tokio::time::sleep(*delay).await;
        }
        self.state_at(strategy, block).cloned().ok_or_else(|| {
            MonitorError::read_failed(strategy, "isUnderwater", "execution reverted")
        })
    }

    async fn protocol_tag(
        &self,
        strategy: Address,
        block: BlockId,
    ) -> Result<String, MonitorError> {
        self.state_at(strategy, block)
            .map(|s| s.protocol_tag.clone())
            .ok_or_else(|| MonitorError::read_failed(strategy, "NAME", "execution reverted"))
    }

    async fn collateral_type(
        &self,
        strategy: Address,
        _block: BlockId,
    ) -> Result<CollateralType, MonitorError> {
        let ilk = self.collateral_types.lock().unwrap().get(&strategy).copied();
        ilk.ok_or_else(|| {
            MonitorError::read_failed(strategy, "collateralType", "execution reverted")
        })
    }
}

pub fn maker_state(
    address: Address,
    under_water: bool,
    ratio: u128,
    low: u128,
    high: u128,
) -> StrategyState {
    StrategyState {
        address,
        is_under_water: under_water,
        collateral_ratio: Wad::from(ratio),
        low_water: Wad::from(low),
        high_water: Wad::from(high),
        protocol_tag: "Maker".to_string(),
    }
}
