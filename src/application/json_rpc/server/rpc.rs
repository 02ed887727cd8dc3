use std::sync::Arc;

use crate::api::tx_submission::TransactionSubmitter;
use crate::chain::ChainClient;
use crate::ledger::LedgerStore;
use crate::protocol::address::EntryCreditSecret;
use crate::protocol::bytes::Bytes32;
use crate::protocol::TRANSACTION_CHAIN_ID;

/// State shared by every request handler.
#[derive(Clone, Debug)]
pub struct RpcServer {
    pub(crate) ledger: Arc<dyn LedgerStore>,
    pub(crate) chain: Arc<dyn ChainClient>,
    pub(crate) submitter: Arc<TransactionSubmitter>,
    pub(crate) transaction_chain: Bytes32,
}

impl RpcServer {
    /// Without a `credential`, only dry-run submissions succeed.
    pub fn new(
        ledger: Arc<dyn LedgerStore>,
        chain: Arc<dyn ChainClient>,
        credential: Option<EntryCreditSecret>,
    ) -> Self {
        let transaction_chain = TRANSACTION_CHAIN_ID;
        let submitter = TransactionSubmitter::new(chain.clone(), credential, transaction_chain);

        Self {
            ledger,
            chain,
            submitter: Arc::new(submitter),
            transaction_chain,
        }
    }
}
