use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;
use tracing::info;

use super::ChainClient;
use crate::protocol::address::EntryCreditAddress;
use crate::protocol::address::EntryCreditSecret;
use crate::protocol::bytes::Bytes32;
use crate::protocol::bytes::HexBytes;
use crate::protocol::entry::Entry;

/// factomd's error code for an unknown entry, block or chain.
const OBJECT_NOT_FOUND: i64 = -32008;

const COMMIT_VERSION: u8 = 0;
const COMMIT_BODY_LEN: usize = 1 + 6 + 32 + 1;
pub const COMMIT_MESSAGE_LEN: usize = COMMIT_BODY_LEN + 32 + 64;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FactomdError {
    #[error("factomd returned error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("factomd response carries neither result nor error")]
    EmptyResponse,

    #[error("factomd request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct FactomdRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct FactomdErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct FactomdResponse<T> {
    result: Option<T>,
    error: Option<FactomdErrorObject>,
}

impl<T> FactomdResponse<T> {
    fn into_result(self) -> Result<T, FactomdError> {
        if let Some(error) = self.error {
            let message = match error.data {
                Some(data) => format!("{} ({data})", error.message),
                None => error.message,
            };
            return Err(FactomdError::Rpc {
                code: error.code,
                message,
            });
        }

        self.result.ok_or(FactomdError::EmptyResponse)
    }
}

#[derive(Debug, Deserialize)]
struct HeightsResult {
    directoryblockheight: u32,
}

#[derive(Debug, Deserialize)]
struct BalanceResult {
    balance: u64,
}

#[derive(Debug, Deserialize)]
struct EntryResult {
    chainid: Bytes32,
    #[serde(default)]
    extids: Vec<HexBytes>,
    content: HexBytes,
}

#[derive(Debug, Deserialize)]
struct CommitResult {
    txid: Bytes32,
}

/// Builds a signed entry commit: version, millisecond timestamp (6 bytes,
/// big endian), entry hash and credit cost, followed by the public key and
/// the ed25519 signature over those first 40 bytes.
pub fn commit_message(
    entry_hash: &Bytes32,
    cost: u8,
    timestamp_millis: u64,
    credential: &EntryCreditSecret,
) -> [u8; COMMIT_MESSAGE_LEN] {
    let mut message = [0u8; COMMIT_MESSAGE_LEN];
    message[0] = COMMIT_VERSION;
    message[1..7].copy_from_slice(&timestamp_millis.to_be_bytes()[2..]);
    message[7..39].copy_from_slice(entry_hash.as_bytes());
    message[39] = cost;

    let signature = credential.sign(&message[..COMMIT_BODY_LEN]);
    message[COMMIT_BODY_LEN..COMMIT_BODY_LEN + 32].copy_from_slice(credential.public().payload());
    message[COMMIT_BODY_LEN + 32..].copy_from_slice(&signature);

    message
}

/// [ChainClient] speaking factomd's JSON-RPC v2 API.
#[derive(Clone, Debug)]
pub struct FactomdClient {
    url: String,
    client: Client,
    last_id: Arc<AtomicU64>,
}

impl FactomdClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building factomd http client")?;

        Ok(Self {
            url: url.into(),
            client,
            last_id: Arc::new(AtomicU64::new(0)),
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, FactomdError> {
        let request = FactomdRequest {
            jsonrpc: "2.0",
            id: self.last_id.fetch_add(1, Ordering::SeqCst),
            method,
            params,
        };
        debug!("factomd call {method}, id {}", request.id);

        // factomd reports errors with non-2xx statuses, so the body is read
        // regardless of status.
        let response: FactomdResponse<T> = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        response.into_result()
    }
}

#[async_trait]
impl ChainClient for FactomdClient {
    async fn current_height(&self) -> anyhow::Result<u32> {
        let heights: HeightsResult = self.call("heights", json!({})).await?;
        Ok(heights.directoryblockheight)
    }

    async fn entry_credit_balance(&self, address: &EntryCreditAddress) -> anyhow::Result<u64> {
        let result: BalanceResult = self
            .call("entry-credit-balance", json!({ "address": address }))
            .await?;
        Ok(result.balance)
    }

    async fn entry(&self, entry_hash: &Bytes32) -> anyhow::Result<Option<Entry>> {
        match self
            .call::<EntryResult>("entry", json!({ "hash": entry_hash }))
            .await
        {
            Ok(result) => Ok(Some(Entry {
                chain_id: result.chainid,
                ext_ids: result.extids.into_iter().map(HexBytes::into_inner).collect(),
                content: result.content.into_inner(),
            })),
            Err(FactomdError::Rpc {
                code: OBJECT_NOT_FOUND,
                ..
            }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn submit_entry(
        &self,
        entry: &Entry,
        credential: &EntryCreditSecret,
    ) -> anyhow::Result<Bytes32> {
        let entry_hash = entry.hash()?;
        let cost = entry.cost()?;
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock before unix epoch")?;
        let timestamp_millis = u64::try_from(now.as_millis())?;
        let commit = commit_message(&entry_hash, cost, timestamp_millis, credential);

        let committed: CommitResult = self
            .call("commit-entry", json!({ "message": hex::encode(commit) }))
            .await
            .context("committing entry")?;
        let _: serde_json::Value = self
            .call(
                "reveal-entry",
                json!({ "entry": hex::encode(entry.marshal_binary()?) }),
            )
            .await
            .context("revealing entry")?;

        info!("submitted entry {entry_hash} in commit {}", committed.txid);
        Ok(committed.txid)
    }
}
