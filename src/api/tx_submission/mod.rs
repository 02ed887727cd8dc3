//! Submission of PegNet transaction entries to the factom chain.
//!
//! A submission is paid for with entry credits from the configured
//! credential. The funding check and the submission happen under one lock,
//! so two concurrent submissions cannot both spend the same credits.

pub mod error;

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;
use tracing::info;

use crate::chain::ChainClient;
use crate::protocol::address::EntryCreditSecret;
use crate::protocol::bytes::Bytes32;
use crate::protocol::entry::Entry;
use error::SubmitError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub chainid: Bytes32,
    /// Absent for dry runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<Bytes32>,
    pub entryhash: Bytes32,
}

#[derive(Debug)]
pub struct TransactionSubmitter {
    chain: Arc<dyn ChainClient>,
    credential: Option<EntryCreditSecret>,
    transaction_chain: Bytes32,
    credential_lock: Mutex<()>,
}

impl TransactionSubmitter {
    pub fn new(
        chain: Arc<dyn ChainClient>,
        credential: Option<EntryCreditSecret>,
        transaction_chain: Bytes32,
    ) -> Self {
        Self {
            chain,
            credential,
            transaction_chain,
            credential_lock: Mutex::new(()),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Binds `entry` to the transaction chain and, unless `dry_run`, pays for
    /// and submits it.
    ///
    /// A dry run touches neither the credit balance nor the chain.
    pub async fn submit(
        &self,
        mut entry: Entry,
        dry_run: bool,
    ) -> Result<SubmissionReceipt, SubmitError> {
        entry.chain_id = self.transaction_chain;
        let entry_hash = entry
            .hash()
            .map_err(|e| SubmitError::InvalidTransaction(e.to_string()))?;

        if dry_run {
            debug!("dry run of entry {entry_hash}");
            return Ok(SubmissionReceipt {
                chainid: entry.chain_id,
                txid: None,
                entryhash: entry_hash,
            });
        }

        let credential = self.credential.as_ref().ok_or(SubmitError::NoCredential)?;
        let _credential_guard = self.credential_lock.lock().await;

        let available = self
            .chain
            .entry_credit_balance(&credential.public())
            .await
            .map_err(SubmitError::BalanceLookup)?;
        let required = entry
            .cost()
            .map_err(|e| SubmitError::InvalidTransaction(e.to_string()))?;
        if available < u64::from(required) {
            return Err(SubmitError::InsufficientCredits {
                required: u64::from(required),
                available,
            });
        }

        let txid = self
            .chain
            .submit_entry(&entry, credential)
            .await
            .map_err(SubmitError::Submission)?;
        info!("submitted entry {entry_hash} for {required} entry credits, txid {txid}");

        Ok(SubmissionReceipt {
            chainid: entry.chain_id,
            txid: Some(txid),
            entryhash: entry_hash,
        })
    }
}
