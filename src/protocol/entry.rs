use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use sha2::Sha512;
use thiserror::Error;

use super::bytes::Bytes32;
use super::bytes::HexBytes;

/// Largest payload (content plus ext-ids) an entry may carry.
pub const MAX_ENTRY_PAYLOAD: usize = 10240;

/// Payload bytes covered by a single entry credit.
const BYTES_PER_CREDIT: usize = 1024;

const ENTRY_VERSION: u8 = 0;
const HEADER_LEN: usize = 1 + 32 + 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("entry payload of {0} bytes exceeds the {MAX_ENTRY_PAYLOAD} byte limit")]
    PayloadTooLarge(usize),

    #[error("ext-ids too large to encode")]
    ExtIdsTooLarge,

    #[error("unsupported entry version {0}")]
    UnsupportedVersion(u8),

    #[error("entry data truncated")]
    Truncated,
}

/// A Factom entry. The hash is content-addressed: it depends only on the
/// chain id, the ext-ids and the content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    pub chain_id: Bytes32,
    pub ext_ids: Vec<Vec<u8>>,
    pub content: Vec<u8>,
}

impl Entry {
    fn ext_ids_len(&self) -> usize {
        self.ext_ids.iter().map(|id| 2 + id.len()).sum()
    }

    /// Bytes that count toward the entry's cost.
    pub fn payload_len(&self) -> usize {
        self.ext_ids_len() + self.content.len()
    }

    /// Entry credits needed to submit this entry to an existing chain.
    pub fn cost(&self) -> Result<u8, EntryError> {
        let size = self.payload_len();
        if size > MAX_ENTRY_PAYLOAD {
            return Err(EntryError::PayloadTooLarge(size));
        }

        let credits = size.div_ceil(BYTES_PER_CREDIT).max(1);
        // at most MAX_ENTRY_PAYLOAD / BYTES_PER_CREDIT
        Ok(credits as u8)
    }

    pub fn marshal_binary(&self) -> Result<Vec<u8>, EntryError> {
        let ext_ids_len =
            u16::try_from(self.ext_ids_len()).map_err(|_| EntryError::ExtIdsTooLarge)?;

        let mut data = Vec::with_capacity(HEADER_LEN + self.payload_len());
        data.push(ENTRY_VERSION);
        data.extend_from_slice(self.chain_id.as_bytes());
        data.extend_from_slice(&ext_ids_len.to_be_bytes());
        for id in &self.ext_ids {
            // each id is shorter than the total checked above
            data.extend_from_slice(&(id.len() as u16).to_be_bytes());
            data.extend_from_slice(id);
        }
        data.extend_from_slice(&self.content);

        Ok(data)
    }

    pub fn unmarshal_binary(data: &[u8]) -> Result<Self, EntryError> {
        if data.len() < HEADER_LEN {
            return Err(EntryError::Truncated);
        }
        if data[0] != ENTRY_VERSION {
            return Err(EntryError::UnsupportedVersion(data[0]));
        }

        let chain_id = Bytes32::try_from(&data[1..33]).map_err(|_| EntryError::Truncated)?;
        let ext_ids_len = usize::from(u16::from_be_bytes([data[33], data[34]]));
        let rest = &data[HEADER_LEN..];
        if rest.len() < ext_ids_len {
            return Err(EntryError::Truncated);
        }

        let (mut ids, content) = rest.split_at(ext_ids_len);
        let mut ext_ids = vec![];
        while !ids.is_empty() {
            if ids.len() < 2 {
                return Err(EntryError::Truncated);
            }
            let len = usize::from(u16::from_be_bytes([ids[0], ids[1]]));
            if ids.len() < 2 + len {
                return Err(EntryError::Truncated);
            }
            ext_ids.push(ids[2..2 + len].to_vec());
            ids = &ids[2 + len..];
        }

        Ok(Self {
            chain_id,
            ext_ids,
            content: content.to_vec(),
        })
    }

    /// `SHA-256(SHA-512(data) || data)` over the binary form.
    pub fn hash(&self) -> Result<Bytes32, EntryError> {
        let data = self.marshal_binary()?;

        let mut hasher = Sha256::new();
        hasher.update(Sha512::digest(&data));
        hasher.update(&data);

        Ok(Bytes32::new(hasher.finalize().into()))
    }
}

/// Wire view of an entry as returned by `get-transaction-entry`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntryView {
    #[serde(rename = "chainid")]
    pub chain_id: Bytes32,
    #[serde(rename = "extids")]
    pub ext_ids: Vec<HexBytes>,
    pub content: HexBytes,
    #[serde(rename = "entryhash")]
    pub entry_hash: Bytes32,
}

impl EntryView {
    pub fn new(entry: &Entry, entry_hash: Bytes32) -> Self {
        Self {
            chain_id: entry.chain_id,
            ext_ids: entry.ext_ids.iter().map(|id| HexBytes::from(id.as_slice())).collect(),
            content: HexBytes::from(entry.content.as_slice()),
            entry_hash,
        }
    }
}
