//! Read access to the synchronized PegNet ledger.
//!
//! The store is fed by a separate sync process; this crate only queries it.
//! Lookups of absent entities return `Ok(None)` so callers can tell
//! "not found" from a failing store.

pub mod history;
pub mod memory;

use async_trait::async_trait;

use crate::protocol::address::FactoidAddress;
use crate::protocol::bytes::Bytes32;
use crate::protocol::ticker_map::TickerMap;
use history::HistoryPage;
use history::HistoryQueryOptions;
use history::HistorySelector;
use history::TransactionStatus;

#[async_trait]
pub trait LedgerStore: Send + Sync + std::fmt::Debug {
    /// Highest block height fully processed into balances and history.
    async fn sync_height(&self) -> u32;

    /// Every address holding (or having held) a balance.
    async fn addresses(&self) -> anyhow::Result<Vec<FactoidAddress>>;

    async fn balances(&self, address: &FactoidAddress) -> anyhow::Result<Option<TickerMap>>;

    async fn issuance(&self) -> anyhow::Result<Option<TickerMap>>;

    async fn rates(&self, height: u32) -> anyhow::Result<Option<TickerMap>>;

    async fn transaction_status(
        &self,
        entry_hash: &Bytes32,
    ) -> anyhow::Result<Option<TransactionStatus>>;

    async fn transaction_exists(&self, entry_hash: &Bytes32) -> anyhow::Result<bool>;

    /// Returns at most [history::HISTORY_PAGE_LIMIT] actions starting at
    /// `options.offset`, together with the total number of matches.
    async fn history(
        &self,
        selector: HistorySelector,
        options: HistoryQueryOptions,
    ) -> anyhow::Result<HistoryPage>;
}
