use std::fmt::Display;

use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;
use serde_json::Value;
use tracing::error;

use crate::api::history::HistoryError;
use crate::api::rich_list::RichListError;
use crate::api::tx_submission::error::SubmitError;

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
    pub id: Option<Value>,
}

/// Wire-level error. Variants with a payload carry a human readable cause,
/// sent as the error's `data`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    #[error("Parse error")]
    ParseError,
    #[error("Invalid Request")]
    InvalidRequest,
    #[error("Method not found")]
    MethodNotFound,
    #[error("Invalid params: {0}")]
    InvalidParams(String),
    #[error("Internal error")]
    InternalError,
    #[error("Token not found")]
    TokenNotFound,
    #[error("Transaction not found")]
    TransactionNotFound,
    #[error("Invalid Transaction: {0}")]
    InvalidTransaction(String),
    #[error("No Entry Credits: {0}")]
    NoEntryCredits(String),
    #[error("Address not found")]
    AddressNotFound,
    #[error("Not found")]
    NotFound,
}

impl RpcError {
    pub fn code(&self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams(_) => -32602,
            Self::InternalError => -32603,
            Self::TokenNotFound => -32800,
            Self::TransactionNotFound => -32803,
            Self::InvalidTransaction(_) => -32804,
            Self::NoEntryCredits(_) => -32806,
            Self::AddressNotFound => -32808,
            Self::NotFound => -32809,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::ParseError => "Parse error",
            Self::InvalidRequest => "Invalid Request",
            Self::MethodNotFound => "Method not found",
            Self::InvalidParams(_) => "Invalid params",
            Self::InternalError => "Internal error",
            Self::TokenNotFound => "Token Not Found",
            Self::TransactionNotFound => "Transaction Not Found",
            Self::InvalidTransaction(_) => "Invalid Transaction",
            Self::NoEntryCredits(_) => "No Entry Credits",
            Self::AddressNotFound => "Address Not Found",
            Self::NotFound => "Not Found",
        }
    }

    pub fn data(&self) -> Option<&str> {
        match self {
            Self::InvalidParams(cause)
            | Self::InvalidTransaction(cause)
            | Self::NoEntryCredits(cause) => Some(cause),
            _ => None,
        }
    }

    /// Logs `cause` in full and returns the opaque [RpcError::InternalError].
    pub fn internal(context: &str, cause: impl Display) -> Self {
        error!("{context}: {cause:#}");
        Self::InternalError
    }
}

impl Serialize for RpcError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let data = self.data();
        let mut state = serializer.serialize_struct("RpcError", 2 + usize::from(data.is_some()))?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("message", self.message())?;
        if let Some(data) = data {
            state.serialize_field("data", data)?;
        }
        state.end()
    }
}

impl From<SubmitError> for RpcError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::InvalidTransaction(cause) => Self::InvalidTransaction(cause),
            SubmitError::NoCredential | SubmitError::InsufficientCredits { .. } => {
                Self::NoEntryCredits(err.to_string())
            }
            SubmitError::BalanceLookup(cause) | SubmitError::Submission(cause) => {
                Self::internal("send-transaction", cause)
            }
        }
    }
}

impl From<RichListError> for RpcError {
    fn from(err: RichListError) -> Self {
        Self::internal("get-rich-list", err)
    }
}

impl From<HistoryError> for RpcError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::NotFound => Self::TransactionNotFound,
            HistoryError::Store(cause) => Self::InvalidParams(cause.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RpcResponse {
    Success {
        jsonrpc: &'static str,
        id: Option<Value>,
        result: Value,
    },
    Error {
        jsonrpc: &'static str,
        id: Option<Value>,
        error: RpcError,
    },
}

impl RpcResponse {
    pub const VERSION: &'static str = "2.0";

    pub fn success(id: Option<Value>, result: Value) -> Self {
        RpcResponse::Success {
            jsonrpc: Self::VERSION,
            id,
            result,
        }
    }

    pub fn error(id: Option<Value>, error: RpcError) -> Self {
        RpcResponse::Error {
            jsonrpc: Self::VERSION,
            id,
            error,
        }
    }
}

pub type RpcResult<T> = Result<T, RpcError>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_without_cause_has_no_data() {
        assert_eq!(
            json!({"code": -32803, "message": "Transaction Not Found"}),
            serde_json::to_value(RpcError::TransactionNotFound).unwrap()
        );
    }

    #[test]
    fn error_cause_goes_into_data() {
        let error = RpcError::InvalidParams(r#"no "params" accepted"#.to_string());
        assert_eq!(
            json!({"code": -32602, "message": "Invalid params", "data": "no \"params\" accepted"}),
            serde_json::to_value(error).unwrap()
        );
    }

    #[test]
    fn submit_errors_map_to_wire_errors() {
        let insufficient: RpcError = SubmitError::InsufficientCredits {
            required: 3,
            available: 1,
        }
        .into();
        let unconfigured: RpcError = SubmitError::NoCredential.into();
        let invalid: RpcError = SubmitError::InvalidTransaction("too big".into()).into();
        let unreachable: RpcError = SubmitError::Submission(anyhow::anyhow!("refused")).into();

        assert_eq!(-32806, insufficient.code());
        assert_eq!(Some("not configured with entry credits"), unconfigured.data());
        assert_eq!(RpcError::InvalidTransaction("too big".into()), invalid);
        assert_eq!(RpcError::InternalError, unreachable);
    }

    #[test]
    fn history_store_failure_is_invalid_params() {
        let err: RpcError = HistoryError::Store(anyhow::anyhow!("bad offset")).into();
        assert_eq!(RpcError::InvalidParams("bad offset".into()), err);
    }

    #[test]
    fn rpc_response_error() {
        let response = RpcResponse::error(Some(json!("1")), RpcError::MethodNotFound);

        let serialized = serde_json::to_string(&response).unwrap();
        assert_eq!(
            r#"{"jsonrpc":"2.0","id":"1","error":{"code":-32601,"message":"Method not found"}}"#,
            serialized
        );
    }

    #[test]
    fn request_without_params_defaults_to_null() {
        let request: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"get-sync-status","id":7}"#).unwrap();

        assert_eq!("get-sync-status", request.method);
        assert_eq!(Value::Null, request.params);
        assert_eq!(Some(json!(7)), request.id);
    }
}
