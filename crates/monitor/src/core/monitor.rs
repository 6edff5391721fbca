//! Strategy monitor: the per-block and per-transaction entry points.
//!
//! A block cycle resolves the registry, reads every strategy's state,
//! evaluates watermarks and renders findings. A transaction cycle matches
//! the transaction's traces against the cached known-strategy set. Neither
//! cycle carries state into the next one except that cache.

use std::sync::Arc;

use alloy::eips::BlockId;
use alloy::primitives::Address;
use tracing::{debug, info};

use crate::config::{validate::parse_selector, KnownSetRefresh, MonitorConfig};
use crate::constants::JUG_DRIP_SELECTOR;
use crate::errors::MonitorError;
use crate::execution::ContractReader;
use crate::types::{CallTrace, Finding};

use super::fee_detector::StabilityFeeDetector;
use super::finding_builder::build_findings;
use super::known_set::KnownStrategySet;
use super::registry::resolve_strategies;
use super::risk_evaluator::evaluate_all;
use super::state_fetcher::fetch_states;

/// Parsed, typed settings the monitor runs with.
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub pool_accountants: Vec<Address>,
    pub jug: Address,
    pub drip_selector: [u8; 4],
    pub target_protocol: String,
    pub known_set_refresh: KnownSetRefresh,
}

impl MonitorSettings {
    pub fn from_config(config: &MonitorConfig) -> Result<Self, MonitorError> {
        let parse_address = |field: &str, raw: &str| -> Result<Address, MonitorError> {
            raw.parse()
                .map_err(|e| MonitorError::Config(format!("{field}: invalid address '{raw}': {e}")))
        };

        let contracts = &config.chain.contracts;
        let pool_accountants = contracts
            .pool_accountants
            .iter()
            .enumerate()
            .map(|(i, raw)| parse_address(&format!("pool_accountants[{i}]"), raw))
            .collect::<Result<Vec<_>, _>>()?;

        let drip_selector = match &config.detection.drip_selector {
            Some(raw) => parse_selector(raw).map_err(MonitorError::Config)?,
            None => JUG_DRIP_SELECTOR,
        };

        Ok(Self {
            pool_accountants,
            jug: parse_address("jug", &contracts.jug)?,
            drip_selector,
            target_protocol: config.detection.target_protocol.clone(),
            known_set_refresh: config.detection.known_set_refresh,
        })
    }
}

pub struct StrategyMonitor<R: ContractReader + ?Sized> {
    reader: Arc<R>,
    settings: MonitorSettings,
    detector: StabilityFeeDetector,
    known: KnownStrategySet,
}

impl<R: ContractReader + ?Sized> StrategyMonitor<R> {
    /// Build with an empty known-strategy set.
    pub fn new(reader: Arc<R>, settings: MonitorSettings) -> Self {
        let detector = StabilityFeeDetector::new(
            settings.jug,
            settings.drip_selector,
            settings.target_protocol.clone(),
        );
        Self {
            reader,
            settings,
            detector,
            known: KnownStrategySet::default(),
        }
    }

    /// Build and load the known-strategy set once.
    pub async fn initialize(
        reader: Arc<R>,
        settings: MonitorSettings,
    ) -> Result<Self, MonitorError> {
        let monitor = Self::new(reader, settings);
        monitor.refresh_known_strategies().await?;
        Ok(monitor)
    }

    pub fn settings(&self) -> &MonitorSettings {
        &self.settings
    }

    pub fn known_strategies(&self) -> &KnownStrategySet {
        &self.known
    }

    /// Re-read the registry and every target strategy's collateral type at
    /// the latest block.
    pub async fn refresh_known_strategies(&self) -> Result<usize, MonitorError> {
        self.known
            .refresh(
                self.reader.as_ref(),
                &self.settings.pool_accountants,
                &self.settings.target_protocol,
                BlockId::latest(),
            )
            .await
    }

    /// Run one block cycle against the state at `block_number`.
    ///
    /// Any registry or state read failure aborts the cycle with `Err`; no
    /// partial findings are returned. The known-strategy set is reloaded here
    /// under the `every_block` policy, or until a first load has succeeded.
    pub async fn handle_block(&self, block_number: u64) -> Result<Vec<Finding>, MonitorError> {
        let reader = self.reader.as_ref();
        let block = BlockId::number(block_number);

        let strategies = resolve_strategies(reader, &self.settings.pool_accountants, block).await?;
        let states = fetch_states(reader, &strategies, block).await?;
        let alerts = evaluate_all(&states, &self.settings.target_protocol);

        for alert in &alerts {
            debug!(block_number, kind = alert.kind(), strategy = %alert.strategy(), "risk alert");
        }

        let findings = build_findings(&alerts);

        info!(
            block_number,
            strategies = strategies.len(),
            findings = findings.len(),
            "block cycle complete"
        );

        let refresh = self.settings.known_set_refresh == KnownSetRefresh::EveryBlock
            || !self.known.is_loaded();
        if refresh {
            let target = &self.settings.target_protocol;
            if let Err(e) = self.known.refresh_profiles(reader, &strategies, target, block).await {
                // The set already logged the failure and kept its previous contents.
                debug!(block_number, error = %e, "known strategy set not refreshed");
            }
        }

        Ok(findings)
    }

    /// Run one transaction cycle against the cached known-strategy set.
    pub fn handle_transaction(&self, traces: &[CallTrace]) -> Vec<Finding> {
        let known = self.known.snapshot();
        let alerts = self.detector.detect(traces, &known);

        if !alerts.is_empty() {
            debug!(traces = traces.len(), alerts = alerts.len(), "stability fee alerts");
        }

        build_findings(&alerts)
    }
}
