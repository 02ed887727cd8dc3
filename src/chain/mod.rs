//! The Factom side: chain height, entry credits and entries.

pub mod factomd;

use async_trait::async_trait;

use crate::protocol::address::EntryCreditAddress;
use crate::protocol::address::EntryCreditSecret;
use crate::protocol::bytes::Bytes32;
use crate::protocol::entry::Entry;

#[async_trait]
pub trait ChainClient: Send + Sync + std::fmt::Debug {
    /// Latest directory block height known to the factom node.
    async fn current_height(&self) -> anyhow::Result<u32>;

    async fn entry_credit_balance(&self, address: &EntryCreditAddress) -> anyhow::Result<u64>;

    /// `Ok(None)` if the node does not know the entry.
    async fn entry(&self, entry_hash: &Bytes32) -> anyhow::Result<Option<Entry>>;

    /// Commits and reveals `entry`, paid for by `credential`. Returns the
    /// transaction id of the commit.
    async fn submit_entry(
        &self,
        entry: &Entry,
        credential: &EntryCreditSecret,
    ) -> anyhow::Result<Bytes32>;
}
