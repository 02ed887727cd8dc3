use serde::Deserialize;
use serde::Serialize;

use super::address::FactoidAddress;
use super::entry::Entry;
use super::ticker::Ticker;

/// The JSON content of an entry on the transaction chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionBatch {
    pub version: u64,
    pub transactions: Vec<BatchTransaction>,
}

/// One transaction of a batch: either a transfer to `transfers` or a
/// conversion of the input into `conversion`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchTransaction {
    pub input: TransactionInput,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transfers: Vec<TransactionOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion: Option<Ticker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub address: FactoidAddress,
    pub amount: u64,
    #[serde(rename = "type")]
    pub ticker: Ticker,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub address: FactoidAddress,
    pub amount: u64,
}

impl TransactionBatch {
    pub fn from_entry(entry: &Entry) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(&entry.content)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::protocol::bytes::Bytes32;

    #[test]
    fn decodes_transfer_and_conversion() {
        let from = FactoidAddress::from_payload([1; 32]);
        let to = FactoidAddress::from_payload([2; 32]);
        let content = json!({
            "version": 1,
            "transactions": [
                {
                    "input": {"address": from, "amount": 150, "type": "pFCT"},
                    "transfers": [{"address": to, "amount": 150}]
                },
                {
                    "input": {"address": from, "amount": 10, "type": "pUSD"},
                    "conversion": "PEG",
                    "metadata": {"memo": "x"}
                }
            ]
        });
        let entry = Entry {
            chain_id: Bytes32::default(),
            ext_ids: vec![],
            content: serde_json::to_vec(&content).unwrap(),
        };

        let batch = TransactionBatch::from_entry(&entry).unwrap();
        assert_eq!(2, batch.transactions.len());
        assert_eq!(Ticker::Fct, batch.transactions[0].input.ticker);
        assert_eq!(to, batch.transactions[0].transfers[0].address);
        assert_eq!(Some(Ticker::Peg), batch.transactions[1].conversion);
        assert_eq!(content, serde_json::to_value(&batch).unwrap());
    }

    #[test]
    fn non_json_content_is_an_error() {
        let entry = Entry {
            content: b"not json".to_vec(),
            ..Default::default()
        };
        assert!(TransactionBatch::from_entry(&entry).is_err());
    }
}
