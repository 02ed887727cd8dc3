//! Response shapes that are not a workflow result of their own.

use serde::Serialize;

use crate::api::sync_status::SyncStatus;
use crate::protocol::bytes::Bytes32;
use crate::protocol::ticker_map::TickerMap;
use crate::protocol::transaction_batch::TransactionBatch;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GetTransactionResponse {
    pub entryhash: Bytes32,
    /// Unix seconds of the block holding the transaction, 0 if unknown.
    pub timestamp: i64,
    pub actions: TransactionBatch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TransactionStatusResponse {
    pub height: u32,
    pub executed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IssuanceResponse {
    pub syncstatus: SyncStatus,
    pub issuance: TickerMap,
}
