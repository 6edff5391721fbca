//! Cached known-strategy set used by the stability fee detector.
//!
//! Readers take a cheap `Arc` snapshot; a refresh builds the replacement
//! set without holding the lock and swaps it in one write. A failed refresh
//! leaves the previous set in place.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use alloy::eips::BlockId;
use alloy::primitives::Address;
use tracing::{info, warn};

use crate::errors::MonitorError;
use crate::execution::ContractReader;
use crate::types::KnownStrategy;

use super::registry::resolve_strategies;
use super::state_fetcher::fetch_profiles;

#[derive(Debug, Default)]
pub struct KnownStrategySet {
    strategies: RwLock<Arc<Vec<KnownStrategy>>>,
    loaded: AtomicBool,
}

impl KnownStrategySet {
    pub fn new(strategies: Vec<KnownStrategy>) -> Self {
        Self {
            strategies: RwLock::new(Arc::new(strategies)),
            loaded: AtomicBool::new(true),
        }
    }

    /// Current set. Never blocks on an in-flight refresh's RPC reads.
    pub fn snapshot(&self) -> Arc<Vec<KnownStrategy>> {
        self.strategies
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Whether any refresh (or construction with a set) has succeeded yet.
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    pub fn replace(&self, strategies: Vec<KnownStrategy>) {
        let mut guard = self.strategies.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(strategies);
        self.loaded.store(true, Ordering::Release);
    }

    /// Re-resolve the registry and re-read every target strategy's profile.
    ///
    /// Returns the new set size.
    pub async fn refresh<R>(
        &self,
        reader: &R,
        accountants: &[Address],
        target_protocol: &str,
        block: BlockId,
    ) -> Result<usize, MonitorError>
    where
        R: ContractReader + ?Sized,
    {
        match resolve_strategies(reader, accountants, block).await {
            Ok(addresses) => {
                self.refresh_profiles(reader, &addresses, target_protocol, block).await
            }
            Err(e) => {
                warn!(error = %e, kept = self.snapshot().len(), "known strategy refresh failed");
                Err(e)
            }
        }
    }

    /// Re-read the profiles of an already resolved strategy list.
    pub async fn refresh_profiles<R>(
        &self,
        reader: &R,
        strategies: &[Address],
        target_protocol: &str,
        block: BlockId,
    ) -> Result<usize, MonitorError>
    where
        R: ContractReader + ?Sized,
    {
        match fetch_profiles(reader, strategies, target_protocol, block).await {
            Ok(profiles) => {
                let count = profiles.len();
                self.replace(profiles);
                info!(count, "known strategy set refreshed");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, kept = self.snapshot().len(), "known strategy refresh failed");
                Err(e)
            }
        }
    }
}
