use async_trait::async_trait;

use crate::api::history::HistoryResult;
use crate::api::rich_list::RichList;
use crate::api::sync_status::SyncStatus;
use crate::api::tx_submission::SubmissionReceipt;
use crate::application::json_rpc::core::error::RpcResult;
use crate::application::json_rpc::core::model::message::*;
use crate::application::json_rpc::core::model::params::*;
use crate::protocol::bytes::Bytes32;
use crate::protocol::entry::EntryView;
use crate::protocol::ticker_map::TickerMap;

/// The typed API behind the JSON-RPC methods. Parameters arrive decoded and
/// validated.
#[async_trait]
pub trait RpcApi: Sync + Send {
    /// The only chain id requests may name.
    fn transaction_chain(&self) -> Bytes32;

    async fn get_rich_list(&self) -> RpcResult<RichList>;

    async fn get_transactions(&self, params: GetTransactionsParams) -> RpcResult<HistoryResult>;

    async fn get_transaction_status(
        &self,
        params: GetTransactionStatusParams,
    ) -> RpcResult<TransactionStatusResponse>;

    async fn get_transaction(
        &self,
        params: GetTransactionParams,
    ) -> RpcResult<GetTransactionResponse>;

    async fn get_transaction_entry(&self, params: GetTransactionParams) -> RpcResult<EntryView>;

    async fn get_pegnet_balances(&self, params: GetPegnetBalancesParams) -> RpcResult<TickerMap>;

    async fn get_pegnet_issuance(&self) -> RpcResult<IssuanceResponse>;

    async fn get_pegnet_rates(&self, params: GetPegnetRatesParams) -> RpcResult<TickerMap>;

    async fn get_sync_status(&self) -> SyncStatus;

    async fn send_transaction(&self, params: SendTransactionParams)
        -> RpcResult<SubmissionReceipt>;
}
