// If code coverage tool `cargo-llvm-cov` is running with the nightly toolchain,
// enable the unstable “coverage” attribute so that test modules can be
// excluded with `#[cfg_attr(coverage_nightly, coverage(off))]`.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod application;
pub mod chain;
pub mod ledger;
pub mod macros;
pub mod protocol;


use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use application::config::cli_args;
use tokio::net::TcpListener;
use tokio::time::Instant;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::application::json_rpc::server::rpc::RpcServer;
use crate::chain::factomd::FactomdClient;
use crate::ledger::memory::MemoryLedger;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seconds a scope may take before [macros::log_slow_scope] reports it, when
/// `LOG_SLOW_SCOPE_THRESHOLD` is unset or unparsable.
const DEFAULT_SLOW_SCOPE_THRESHOLD: f64 = 0.001;

/// Connects to the configured backends and serves JSON-RPC until the server
/// stops.
pub async fn initialize(cli_args: cli_args::Args) -> Result<()> {
    info!("Starting pegnet-rpc {VERSION}.");

    let ledger = match &cli_args.ledger_snapshot {
        Some(path) => Arc::new(MemoryLedger::load(path).await?),
        None => {
            warn!("No ledger snapshot given. Serving an empty ledger.");
            Arc::new(MemoryLedger::default())
        }
    };
    if let (Some(path), Some(every)) = (
        cli_args.ledger_snapshot.clone(),
        cli_args.snapshot_reload_interval,
    ) {
        spawn_snapshot_reload(ledger.clone(), path, every);
    }

    let chain = Arc::new(FactomdClient::new(
        cli_args.factomd_url.clone(),
        cli_args.factomd_timeout,
    )?);
    info!("Using factomd at {}", cli_args.factomd_url);

    match &cli_args.ec_private_key {
        Some(secret) => info!("Paying for transactions from {}", secret.public()),
        None => warn!("No entry credit key configured. Only dry-run submissions will succeed."),
    }

    let socket_addr = cli_args.rpc_socket_addr();
    let rpc_server = RpcServer::new(ledger, chain, cli_args.ec_private_key);

    let listener = TcpListener::bind(socket_addr).await.with_context(|| {
        format!("Failed to bind to JSON-RPC port {socket_addr}. Is an instance of this program already running?")
    })?;

    rpc_server.serve(listener).await
}

/// Re-reads the ledger snapshot at `path` every `every`, keeping the served
/// state whenever a read fails.
fn spawn_snapshot_reload(ledger: Arc<MemoryLedger>, path: PathBuf, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // the first tick completes immediately and the snapshot is fresh
        interval.tick().await;
        loop {
            interval.tick().await;
            match ledger.reload(&path).await {
                Ok(height) => debug!("reloaded ledger snapshot at height {height}"),
                Err(e) => warn!("Keeping previous ledger snapshot: {e:#}"),
            }
        }
    });
}

/// for logging how long a scope takes to execute.
///
/// Nothing is logged unless the scope takes at least the threshold, in
/// seconds. Logging happens at debug level when the value is dropped.
///
/// for convenience see [macros::log_slow_scope].
#[derive(Debug, Clone)]
pub struct ScopeDurationLogger<'a> {
    start: Instant,
    description: &'a str,
    log_slow_fn_threshold: f64,
    location: &'static std::panic::Location<'static>,
}

impl<'a> ScopeDurationLogger<'a> {
    #[track_caller]
    pub fn new(description: &'a str, log_slow_fn_threshold: f64) -> Self {
        Self {
            start: Instant::now(),
            description,
            log_slow_fn_threshold,
            location: std::panic::Location::caller(),
        }
    }

    /// Threshold from `LOG_SLOW_SCOPE_THRESHOLD`, in seconds.
    #[track_caller]
    pub fn new_default_threshold(description: &'a str) -> Self {
        let threshold = env::var("LOG_SLOW_SCOPE_THRESHOLD")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(DEFAULT_SLOW_SCOPE_THRESHOLD);
        Self::new(description, threshold)
    }
}

impl Drop for ScopeDurationLogger<'_> {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();

        if duration >= self.log_slow_fn_threshold {
            debug!(
                "executed {} in {} secs.  exceeds slow fn threshold of {} secs.  location: {}",
                self.description, duration, self.log_slow_fn_threshold, self.location,
            );
        }
    }
}
