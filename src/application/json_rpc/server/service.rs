use async_trait::async_trait;
use tracing::warn;

use crate::api::history::query_history;
use crate::api::history::HistoryResult;
use crate::api::rich_list::rich_list;
use crate::api::rich_list::RichList;
use crate::api::sync_status::sync_status;
use crate::api::sync_status::SyncStatus;
use crate::api::tx_submission::SubmissionReceipt;
use crate::application::json_rpc::core::api::rpc::RpcApi;
use crate::application::json_rpc::core::error::RpcError;
use crate::application::json_rpc::core::error::RpcResult;
use crate::application::json_rpc::core::model::message::*;
use crate::application::json_rpc::core::model::params::*;
use crate::application::json_rpc::server::rpc::RpcServer;
use crate::macros::fn_name;
use crate::macros::log_slow_scope;
use crate::protocol::bytes::Bytes32;
use crate::protocol::entry::Entry;
use crate::protocol::entry::EntryView;
use crate::protocol::ticker_map::TickerMap;
use crate::protocol::transaction_batch::TransactionBatch;

impl RpcServer {
    /// Looks up a recorded transaction's entry on the chain.
    async fn recorded_entry(&self, entry_hash: &Bytes32) -> RpcResult<Entry> {
        let exists = self
            .ledger
            .transaction_exists(entry_hash)
            .await
            .map_err(|e| RpcError::internal("transaction lookup", e))?;
        if !exists {
            return Err(RpcError::TransactionNotFound);
        }

        self.chain
            .entry(entry_hash)
            .await
            .map_err(|e| RpcError::internal("entry lookup", e))?
            .ok_or(RpcError::TransactionNotFound)
    }
}

#[async_trait]
impl RpcApi for RpcServer {
    fn transaction_chain(&self) -> Bytes32 {
        self.transaction_chain
    }

    async fn get_rich_list(&self) -> RpcResult<RichList> {
        log_slow_scope!(fn_name!());
        Ok(rich_list(&*self.ledger).await?)
    }

    async fn get_transactions(&self, params: GetTransactionsParams) -> RpcResult<HistoryResult> {
        log_slow_scope!(fn_name!());
        let selector = params.selector()?;
        Ok(query_history(&*self.ledger, selector, params.options()).await?)
    }

    async fn get_transaction_status(
        &self,
        params: GetTransactionStatusParams,
    ) -> RpcResult<TransactionStatusResponse> {
        log_slow_scope!(fn_name!());
        let entry_hash = params.entry_hash()?;
        let status = self
            .ledger
            .transaction_status(&entry_hash)
            .await
            .map_err(|e| RpcError::InvalidParams(e.to_string()))?
            .ok_or(RpcError::TransactionNotFound)?;

        Ok(TransactionStatusResponse {
            height: status.height,
            executed: status.executed,
        })
    }

    async fn get_transaction(
        &self,
        params: GetTransactionParams,
    ) -> RpcResult<GetTransactionResponse> {
        log_slow_scope!(fn_name!());
        let entry_hash = params.entry_hash()?;
        let entry = self.recorded_entry(&entry_hash).await?;
        let actions = TransactionBatch::from_entry(&entry)
            .map_err(|e| RpcError::internal("decoding transaction batch", e))?;

        let timestamp = match self.ledger.transaction_status(&entry_hash).await {
            Ok(status) => status.map_or(0, |s| s.timestamp),
            Err(e) => {
                warn!("no timestamp for {entry_hash}: {e:#}");
                0
            }
        };

        Ok(GetTransactionResponse {
            entryhash: entry_hash,
            timestamp,
            actions,
        })
    }

    async fn get_transaction_entry(&self, params: GetTransactionParams) -> RpcResult<EntryView> {
        log_slow_scope!(fn_name!());
        let entry_hash = params.entry_hash()?;
        let entry = self.recorded_entry(&entry_hash).await?;

        Ok(EntryView::new(&entry, entry_hash))
    }

    async fn get_pegnet_balances(&self, params: GetPegnetBalancesParams) -> RpcResult<TickerMap> {
        log_slow_scope!(fn_name!());
        let address = params.address()?;

        self.ledger
            .balances(&address)
            .await
            .map_err(|e| RpcError::internal("balance lookup", e))?
            .ok_or(RpcError::AddressNotFound)
    }

    async fn get_pegnet_issuance(&self) -> RpcResult<IssuanceResponse> {
        log_slow_scope!(fn_name!());
        let issuance = self
            .ledger
            .issuance()
            .await
            .map_err(|e| RpcError::internal("issuance lookup", e))?
            .ok_or(RpcError::AddressNotFound)?;

        Ok(IssuanceResponse {
            syncstatus: sync_status(&*self.ledger, &*self.chain).await,
            issuance,
        })
    }

    async fn get_pegnet_rates(&self, params: GetPegnetRatesParams) -> RpcResult<TickerMap> {
        log_slow_scope!(fn_name!());
        let height = params.height()?;

        self.ledger
            .rates(height)
            .await
            .map_err(|e| RpcError::internal("rate lookup", e))?
            .filter(|rates| !rates.is_empty())
            .ok_or(RpcError::NotFound)
    }

    async fn get_sync_status(&self) -> SyncStatus {
        log_slow_scope!(fn_name!());
        sync_status(&*self.ledger, &*self.chain).await
    }

    async fn send_transaction(
        &self,
        params: SendTransactionParams,
    ) -> RpcResult<SubmissionReceipt> {
        log_slow_scope!(fn_name!());
        Ok(self.submitter.submit(params.entry(), params.dryrun).await?)
    }
}
