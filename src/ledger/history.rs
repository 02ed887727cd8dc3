use serde::Deserialize;
use serde::Serialize;

use crate::protocol::address::FactoidAddress;
use crate::protocol::bytes::Bytes32;
use crate::protocol::ticker::Ticker;

/// Most actions a store returns for one history query.
pub const HISTORY_PAGE_LIMIT: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryActionKind {
    Transfer,
    Conversion,
    Coinbase,
    Burn,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryOutput {
    pub address: FactoidAddress,
    pub amount: u64,
}

/// One action of a recorded transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryAction {
    #[serde(rename = "hash")]
    pub entry_hash: Bytes32,
    #[serde(rename = "txindex")]
    pub tx_index: u64,
    pub height: u32,
    pub timestamp: i64,
    pub executed: bool,
    #[serde(rename = "txaction")]
    pub kind: HistoryActionKind,
    #[serde(rename = "fromaddress")]
    pub from_address: FactoidAddress,
    #[serde(rename = "fromasset")]
    pub from_asset: Ticker,
    #[serde(rename = "fromamount")]
    pub from_amount: u64,
    #[serde(rename = "toasset", default, skip_serializing_if = "Option::is_none")]
    pub to_asset: Option<Ticker>,
    #[serde(rename = "toamount", default, skip_serializing_if = "Option::is_none")]
    pub to_amount: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<HistoryOutput>,
}

impl HistoryAction {
    pub fn involves(&self, address: &FactoidAddress) -> bool {
        self.from_address == *address || self.outputs.iter().any(|o| o.address == *address)
    }
}

/// Status of a recorded transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransactionStatus {
    pub height: u32,
    pub executed: bool,
    pub timestamp: i64,
}

/// What a history query is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistorySelector {
    EntryHash(Bytes32),
    Address(FactoidAddress),
    Height(u32),
}

impl HistorySelector {
    /// Picks the selector from optional parts. An entry hash wins over an
    /// address, which wins over a height.
    pub fn resolve(
        entry_hash: Option<Bytes32>,
        address: Option<FactoidAddress>,
        height: Option<u32>,
    ) -> Option<Self> {
        entry_hash
            .map(Self::EntryHash)
            .or(address.map(Self::Address))
            .or(height.map(Self::Height))
    }
}

/// Filters and paging shared by every selector.
///
/// With none of the kind toggles set, every kind is included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HistoryQueryOptions {
    pub offset: usize,
    pub desc: bool,
    pub transfer: bool,
    pub conversion: bool,
    pub coinbase: bool,
    pub burn: bool,
}

impl HistoryQueryOptions {
    pub fn includes(&self, kind: HistoryActionKind) -> bool {
        if !(self.transfer || self.conversion || self.coinbase || self.burn) {
            return true;
        }

        match kind {
            HistoryActionKind::Transfer => self.transfer,
            HistoryActionKind::Conversion => self.conversion,
            HistoryActionKind::Coinbase => self.coinbase,
            HistoryActionKind::Burn => self.burn,
        }
    }
}

/// One page of matching actions and the number of matches across all pages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryPage {
    pub actions: Vec<HistoryAction>,
    pub count: usize,
}
