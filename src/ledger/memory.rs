use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use itertools::Either;
use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use super::history::HistoryAction;
use super::history::HistoryPage;
use super::history::HistoryQueryOptions;
use super::history::HistorySelector;
use super::history::TransactionStatus;
use super::history::HISTORY_PAGE_LIMIT;
use super::LedgerStore;
use crate::protocol::address::FactoidAddress;
use crate::protocol::bytes::Bytes32;
use crate::protocol::ticker_map::TickerMap;

/// Everything a [MemoryLedger] knows. Also its on-disk JSON format.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerSnapshot {
    #[serde(rename = "syncheight")]
    pub sync_height: u32,
    #[serde(default)]
    pub balances: BTreeMap<FactoidAddress, TickerMap>,
    #[serde(default)]
    pub issuance: Option<TickerMap>,
    #[serde(default)]
    pub rates: BTreeMap<u32, TickerMap>,
    #[serde(default)]
    pub actions: Vec<HistoryAction>,
}

/// Ledger held in memory, for tests and for serving a fixed snapshot.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    snapshot: RwLock<LedgerSnapshot>,
}

impl MemoryLedger {
    pub fn new(snapshot: LedgerSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }

    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        Ok(Self::new(read_snapshot(path).await?))
    }

    /// Swaps in the snapshot at `path`. On error the served state is kept.
    pub async fn reload(&self, path: &Path) -> anyhow::Result<u32> {
        let snapshot = read_snapshot(path).await?;
        let height = snapshot.sync_height;
        *self.snapshot.write().await = snapshot;
        Ok(height)
    }
}

async fn read_snapshot(path: &Path) -> anyhow::Result<LedgerSnapshot> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading ledger snapshot {}", path.display()))?;
    let snapshot: LedgerSnapshot = serde_json::from_slice(&data)
        .with_context(|| format!("parsing ledger snapshot {}", path.display()))?;

    info!(
        "read ledger snapshot at height {} with {} addresses and {} actions",
        snapshot.sync_height,
        snapshot.balances.len(),
        snapshot.actions.len()
    );

    Ok(snapshot)
}

fn matches(action: &HistoryAction, selector: &HistorySelector) -> bool {
    match selector {
        HistorySelector::EntryHash(hash) => action.entry_hash == *hash,
        HistorySelector::Address(address) => action.involves(address),
        HistorySelector::Height(height) => action.height == *height,
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn sync_height(&self) -> u32 {
        self.snapshot.read().await.sync_height
    }

    async fn addresses(&self) -> anyhow::Result<Vec<FactoidAddress>> {
        Ok(self.snapshot.read().await.balances.keys().copied().collect())
    }

    async fn balances(&self, address: &FactoidAddress) -> anyhow::Result<Option<TickerMap>> {
        Ok(self.snapshot.read().await.balances.get(address).cloned())
    }

    async fn issuance(&self) -> anyhow::Result<Option<TickerMap>> {
        Ok(self.snapshot.read().await.issuance.clone())
    }

    async fn rates(&self, height: u32) -> anyhow::Result<Option<TickerMap>> {
        Ok(self.snapshot.read().await.rates.get(&height).cloned())
    }

    async fn transaction_status(
        &self,
        entry_hash: &Bytes32,
    ) -> anyhow::Result<Option<TransactionStatus>> {
        let snapshot = self.snapshot.read().await;
        Ok(snapshot
            .actions
            .iter()
            .find(|a| a.entry_hash == *entry_hash)
            .map(|a| TransactionStatus {
                height: a.height,
                executed: a.executed,
                timestamp: a.timestamp,
            }))
    }

    async fn transaction_exists(&self, entry_hash: &Bytes32) -> anyhow::Result<bool> {
        let snapshot = self.snapshot.read().await;
        Ok(snapshot.actions.iter().any(|a| a.entry_hash == *entry_hash))
    }

    async fn history(
        &self,
        selector: HistorySelector,
        options: HistoryQueryOptions,
    ) -> anyhow::Result<HistoryPage> {
        let snapshot = self.snapshot.read().await;

        let matching = snapshot
            .actions
            .iter()
            .filter(|a| matches(a, &selector) && options.includes(a.kind))
            .sorted_by_key(|a| (a.height, a.entry_hash, a.tx_index));
        let count = matching.len();
        let ordered = if options.desc {
            Either::Left(matching.rev())
        } else {
            Either::Right(matching)
        };

        Ok(HistoryPage {
            count,
            actions: ordered
                .skip(options.offset)
                .take(HISTORY_PAGE_LIMIT)
                .cloned()
                .collect(),
        })
    }
}
