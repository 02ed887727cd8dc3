//! Request parameters and their decoding.
//!
//! Decoding is strict: `params` is a named-field object and a field a method
//! does not know is an error. A method without parameters rejects any
//! `params` other than `null`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::application::json_rpc::core::error::RpcError;
use crate::application::json_rpc::core::error::RpcResult;
use crate::ledger::history::HistoryQueryOptions;
use crate::ledger::history::HistorySelector;
use crate::protocol::address::FactoidAddress;
use crate::protocol::bytes::Bytes32;
use crate::protocol::bytes::HexBytes;
use crate::protocol::entry::Entry;

/// A method's parameter object.
pub trait Params: DeserializeOwned + Default {
    /// Semantic checks run after decoding, or on the default value when the
    /// request carries no parameters.
    fn validate(&mut self) -> RpcResult<()> {
        Ok(())
    }

    /// The chain the request is about, if it names one.
    fn chain_id(&self) -> Option<Bytes32> {
        None
    }
}

fn required(field: &str) -> RpcError {
    RpcError::InvalidParams(format!("required: {field:?}"))
}

/// Decodes and validates `raw` as `P`. A chain id in the parameters must be
/// `transaction_chain`.
pub fn decode_params<P: Params>(raw: Value, transaction_chain: &Bytes32) -> RpcResult<P> {
    let mut params = match raw {
        Value::Null => P::default(),
        Value::Object(_) => {
            serde_json::from_value(raw).map_err(|e| RpcError::InvalidParams(e.to_string()))?
        }
        _ => {
            return Err(RpcError::InvalidParams(
                r#""params" must be an object"#.to_string(),
            ))
        }
    };
    params.validate()?;

    match params.chain_id() {
        Some(chain_id) if chain_id != *transaction_chain => Err(RpcError::TokenNotFound),
        _ => Ok(params),
    }
}

pub fn expect_no_params(raw: &Value) -> RpcResult<()> {
    if raw.is_null() {
        Ok(())
    } else {
        Err(RpcError::InvalidParams(r#"no "params" accepted"#.to_string()))
    }
}

/// `get-transaction` and `get-transaction-entry`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetTransactionParams {
    #[serde(default)]
    pub entryhash: Option<Bytes32>,
    #[serde(default)]
    pub chainid: Option<Bytes32>,
}

impl GetTransactionParams {
    pub fn entry_hash(&self) -> RpcResult<Bytes32> {
        self.entryhash.ok_or_else(|| required("entryhash"))
    }
}

impl Params for GetTransactionParams {
    fn validate(&mut self) -> RpcResult<()> {
        self.entry_hash().map(|_| ())
    }

    fn chain_id(&self) -> Option<Bytes32> {
        self.chainid
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetTransactionStatusParams {
    #[serde(default)]
    pub entryhash: Option<Bytes32>,
}

impl GetTransactionStatusParams {
    pub fn entry_hash(&self) -> RpcResult<Bytes32> {
        self.entryhash.ok_or_else(|| required("entryhash"))
    }
}

impl Params for GetTransactionStatusParams {
    fn validate(&mut self) -> RpcResult<()> {
        self.entry_hash().map(|_| ())
    }
}

/// `get-transactions`: one of `entryhash`, `address` or `height` selects the
/// history; the rest filters and pages it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GetTransactionsParams {
    pub entryhash: Option<Bytes32>,
    pub address: Option<FactoidAddress>,
    pub height: Option<u32>,
    pub offset: usize,
    pub desc: bool,
    pub transfer: bool,
    pub conversion: bool,
    pub coinbase: bool,
    pub burn: bool,
}

impl GetTransactionsParams {
    pub fn selector(&self) -> RpcResult<HistorySelector> {
        HistorySelector::resolve(self.entryhash, self.address, self.height).ok_or_else(|| {
            RpcError::InvalidParams("no entryhash, address, or height specified".to_string())
        })
    }

    pub fn options(&self) -> HistoryQueryOptions {
        HistoryQueryOptions {
            offset: self.offset,
            desc: self.desc,
            transfer: self.transfer,
            conversion: self.conversion,
            coinbase: self.coinbase,
            burn: self.burn,
        }
    }
}

impl Params for GetTransactionsParams {
    fn validate(&mut self) -> RpcResult<()> {
        self.selector().map(|_| ())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetPegnetBalancesParams {
    #[serde(default)]
    pub address: Option<FactoidAddress>,
}

impl GetPegnetBalancesParams {
    pub fn address(&self) -> RpcResult<FactoidAddress> {
        self.address.ok_or_else(|| required("address"))
    }
}

impl Params for GetPegnetBalancesParams {
    fn validate(&mut self) -> RpcResult<()> {
        self.address().map(|_| ())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetPegnetRatesParams {
    #[serde(default)]
    pub height: Option<u32>,
}

impl GetPegnetRatesParams {
    pub fn height(&self) -> RpcResult<u32> {
        self.height.ok_or_else(|| required("height"))
    }
}

impl Params for GetPegnetRatesParams {
    fn validate(&mut self) -> RpcResult<()> {
        self.height().map(|_| ())
    }
}

/// `send-transaction`: the entry is given either as `raw` binary or as
/// `extids` plus `content`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SendTransactionParams {
    pub chainid: Option<Bytes32>,
    pub extids: Vec<HexBytes>,
    pub content: HexBytes,
    pub raw: Option<HexBytes>,
    pub dryrun: bool,

    #[serde(skip)]
    raw_entry: Option<Entry>,
}

impl SendTransactionParams {
    /// The entry to submit. Only meaningful after [Params::validate].
    pub fn entry(&self) -> Entry {
        match &self.raw_entry {
            Some(entry) => entry.clone(),
            None => Entry {
                chain_id: self.chainid.unwrap_or_default(),
                ext_ids: self.extids.iter().map(|id| id.0.clone()).collect(),
                content: self.content.0.clone(),
            },
        }
    }
}

impl Params for SendTransactionParams {
    fn validate(&mut self) -> RpcResult<()> {
        let Some(raw) = &self.raw else {
            if self.content.is_empty() || self.extids.is_empty() {
                return Err(RpcError::InvalidParams(
                    r#"required: "raw" or "content" and "extids""#.to_string(),
                ));
            }
            return Ok(());
        };

        if !self.extids.is_empty() || !self.content.is_empty() || self.chainid.is_some() {
            return Err(RpcError::InvalidParams(
                r#""raw" cannot be used with "chainid", "content" or "extids""#.to_string(),
            ));
        }
        let entry = Entry::unmarshal_binary(&raw.0)
            .map_err(|e| RpcError::InvalidParams(format!("invalid raw entry: {e}")))?;
        self.raw_entry = Some(entry);

        Ok(())
    }

    fn chain_id(&self) -> Option<Bytes32> {
        self.raw_entry
            .as_ref()
            .map(|entry| entry.chain_id)
            .or(self.chainid)
    }
}
