//! Factom human-readable addresses.
//!
//! Every address is base58 of `prefix (2) || payload (32) || checksum (4)`
//! where the checksum is the first four bytes of a double SHA-256 over
//! `prefix || payload`. The prefix makes the text form start with `FA`,
//! `EC` or `Es` respectively.

use std::fmt::Display;
use std::str::FromStr;

use ed25519_dalek::Signer;
use ed25519_dalek::SigningKey;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

const PREFIX_LEN: usize = 2;
const PAYLOAD_LEN: usize = 32;
const CHECKSUM_LEN: usize = 4;
const DECODED_LEN: usize = PREFIX_LEN + PAYLOAD_LEN + CHECKSUM_LEN;

const FACTOID_PREFIX: [u8; PREFIX_LEN] = [0x5f, 0xb1];
const ENTRY_CREDIT_PREFIX: [u8; PREFIX_LEN] = [0x59, 0x2a];
const ENTRY_CREDIT_SECRET_PREFIX: [u8; PREFIX_LEN] = [0x5d, 0xb6];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("invalid length: expected {DECODED_LEN} decoded bytes, got {0}")]
    InvalidLength(usize),

    #[error("invalid prefix, expected a {0} address")]
    InvalidPrefix(&'static str),

    #[error("invalid checksum")]
    InvalidChecksum,
}

fn checksum(prefix: &[u8; PREFIX_LEN], payload: &[u8; PAYLOAD_LEN]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(prefix);
    hasher.update(payload);
    let digest = Sha256::digest(hasher.finalize());

    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

fn encode(prefix: &[u8; PREFIX_LEN], payload: &[u8; PAYLOAD_LEN]) -> String {
    let mut raw = Vec::with_capacity(DECODED_LEN);
    raw.extend_from_slice(prefix);
    raw.extend_from_slice(payload);
    raw.extend_from_slice(&checksum(prefix, payload));
    bs58::encode(raw).into_string()
}

fn decode(
    s: &str,
    prefix: &[u8; PREFIX_LEN],
    kind: &'static str,
) -> Result<[u8; PAYLOAD_LEN], AddressError> {
    let raw = bs58::decode(s)
        .into_vec()
        .map_err(|e| AddressError::InvalidBase58(e.to_string()))?;
    if raw.len() != DECODED_LEN {
        return Err(AddressError::InvalidLength(raw.len()));
    }
    if raw[..PREFIX_LEN] != prefix[..] {
        return Err(AddressError::InvalidPrefix(kind));
    }

    let mut payload = [0u8; PAYLOAD_LEN];
    payload.copy_from_slice(&raw[PREFIX_LEN..PREFIX_LEN + PAYLOAD_LEN]);
    if raw[PREFIX_LEN + PAYLOAD_LEN..] != checksum(prefix, &payload)[..] {
        return Err(AddressError::InvalidChecksum);
    }

    Ok(payload)
}

macro_rules! address_codec {
    ($name:ident, $prefix:expr, $kind:literal) => {
        impl $name {
            pub fn from_payload(payload: [u8; PAYLOAD_LEN]) -> Self {
                Self(payload)
            }

            pub fn payload(&self) -> &[u8; PAYLOAD_LEN] {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = AddressError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                decode(s, &$prefix, $kind).map(Self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::from_str(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Text serialization, for public addresses only.
macro_rules! public_address_serialize {
    ($name:ident, $prefix:expr) => {
        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&encode(&$prefix, &self.0))
            }
        }
    };
}

/// Public factoid address (`FA…`). The payload is the RCD hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FactoidAddress([u8; PAYLOAD_LEN]);
address_codec!(FactoidAddress, FACTOID_PREFIX, "factoid");
public_address_serialize!(FactoidAddress, FACTOID_PREFIX);

impl Display for FactoidAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", encode(&FACTOID_PREFIX, &self.0))
    }
}

/// Public entry credit address (`EC…`). The payload is the ed25519 public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryCreditAddress([u8; PAYLOAD_LEN]);
address_codec!(EntryCreditAddress, ENTRY_CREDIT_PREFIX, "entry credit");
public_address_serialize!(EntryCreditAddress, ENTRY_CREDIT_PREFIX);

impl Display for EntryCreditAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", encode(&ENTRY_CREDIT_PREFIX, &self.0))
    }
}

/// Private entry credit address (`Es…`), the credential that pays for
/// entries. Never displayed and not `Serialize`.
#[derive(Clone, PartialEq, Eq)]
pub struct EntryCreditSecret([u8; PAYLOAD_LEN]);
address_codec!(EntryCreditSecret, ENTRY_CREDIT_SECRET_PREFIX, "entry credit secret");

impl std::fmt::Debug for EntryCreditSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EntryCreditSecret({})", self.public())
    }
}

impl EntryCreditSecret {
    fn signing_key(&self) -> SigningKey {
        SigningKey::from_bytes(&self.0)
    }

    pub fn public(&self) -> EntryCreditAddress {
        EntryCreditAddress(self.signing_key().verifying_key().to_bytes())
    }

    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key().sign(message).to_bytes()
    }

    /// The text form. Use sparingly, this leaks the key.
    pub fn to_secret_string(&self) -> String {
        encode(&ENTRY_CREDIT_SECRET_PREFIX, &self.0)
    }
}
