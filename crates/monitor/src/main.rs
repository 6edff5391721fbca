use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use alloy::consensus::Transaction as _;
use alloy::eips::BlockNumberOrTag;
use alloy::providers::{Provider, RootProvider};
use alloy::transports::http::reqwest::Url;
use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use maker_strategy_monitor::config;
use maker_strategy_monitor::core::monitor::{MonitorSettings, StrategyMonitor};
use maker_strategy_monitor::execution::{HttpProvider, OnChainReader};
use maker_strategy_monitor::logging;
use maker_strategy_monitor::types::{CallTrace, Finding};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignore if missing).
    let _ = dotenvy::dotenv();

    let config_dir = std::env::var("MONITOR_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    let config = config::load_config(&config_dir)?;

    // Hold the guard for the process lifetime.
    let _guard = logging::init_tracing(&config.app.logging)?;

    info!(
        chain_id = config.chain.chain_id,
        chain_name = %config.chain.chain_name,
        accountants = config.chain.contracts.pool_accountants.len(),
        target_protocol = %config.detection.target_protocol,
        refresh = ?config.detection.known_set_refresh,
        "maker strategy monitor starting"
    );

    let rpc_url: Url = config
        .chain
        .rpc
        .http_url
        .parse()
        .context("failed to parse RPC URL")?;
    let provider = RootProvider::new_http(rpc_url);

    let settings = MonitorSettings::from_config(&config)?;
    if settings.pool_accountants.is_empty() {
        warn!("no pool accountants configured; block cycles will report nothing");
    }

    let reader = Arc::new(OnChainReader::new(provider.clone()));
    let monitor = StrategyMonitor::new(reader, settings);

    // A failed load is retried by the first block cycle.
    match monitor.refresh_known_strategies().await {
        Ok(count) => info!(known_strategies = count, "known strategy set loaded"),
        Err(e) => warn!(error = %e, "known strategy set not loaded, retrying on next block"),
    }

    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();
    let poll_interval = Duration::from_secs(config.chain.poll_interval_seconds);
    let scan_transactions = config.detection.scan_transactions;

    let loop_handle = tokio::spawn(async move {
        run_block_loop(
            &monitor,
            &provider,
            poll_interval,
            scan_transactions,
            &shutdown_clone,
        )
        .await;
    });

    info!("monitor running, press Ctrl+C to shutdown");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl+C")?;

    info!("shutdown signal received, stopping gracefully...");
    shutdown.cancel();

    if let Err(e) = loop_handle.await {
        error!(error = %e, "block loop task panicked");
    }

    info!("shutdown complete");
    Ok(())
}

/// Poll for new blocks and run both cycles on each one.
///
/// A failed cycle is logged and the loop moves on to the next block.
async fn run_block_loop(
    monitor: &StrategyMonitor<OnChainReader>,
    provider: &HttpProvider,
    poll_interval: Duration,
    scan_transactions: bool,
    shutdown: &CancellationToken,
) {
    let mut last_block: Option<u64> = None;

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("block loop shutting down");
                return;
            }
            _ = tokio::time::sleep(poll_interval) => {}
        }

        let head = match provider.get_block_number().await {
            Ok(n) => n,
            Err(e) => {
                error!(error = %e, "failed to read block number");
                continue;
            }
        };

        // Start from the head on first poll; afterwards catch up on skipped blocks,
        // each evaluated at its own height.
        let first = last_block.map_or(head, |b| b + 1);
        for block_number in first..=head {
            if shutdown.is_cancelled() {
                return;
            }

            match monitor.handle_block(block_number).await {
                Ok(findings) => emit(block_number, &findings),
                Err(e) => error!(block_number, error = %e, "block cycle failed"),
            }

            if scan_transactions {
                scan_block_transactions(monitor, provider, block_number).await;
            }

            last_block = Some(block_number);
        }
    }
}

/// Feed every transaction's top-level call to the stability fee detector.
async fn scan_block_transactions(
    monitor: &StrategyMonitor<OnChainReader>,
    provider: &HttpProvider,
    block_number: u64,
) {
    let block = match provider
        .get_block_by_number(BlockNumberOrTag::Number(block_number))
        .full()
        .await
    {
        Ok(Some(block)) => block,
        Ok(None) => {
            warn!(block_number, "block not found");
            return;
        }
        Err(e) => {
            error!(block_number, error = %e, "failed to fetch block transactions");
            return;
        }
    };

    for tx in block.transactions.txns() {
        let Some(to) = tx.to() else {
            continue;
        };
        let trace = CallTrace::new(to, tx.input().clone());
        let findings = monitor.handle_transaction(std::slice::from_ref(&trace));
        emit(block_number, &findings);
    }
}

fn emit(block_number: u64, findings: &[Finding]) {
    for finding in findings {
        warn!(
            block_number,
            alert_id = %finding.alert_id,
            severity = ?finding.severity,
            name = %finding.name,
            "finding"
        );
        match serde_json::to_string(finding) {
            Ok(json) => println!("{json}"),
            Err(e) => error!(error = %e, "failed to serialize finding"),
        }
    }
}
