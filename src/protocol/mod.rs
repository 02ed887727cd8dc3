//! Value types shared by the ledger, the chain client and the RPC layer.

pub mod address;
pub mod bytes;
pub mod conversions;
pub mod entry;
pub mod ticker;
pub mod ticker_map;
pub mod transaction_batch;

use bytes::Bytes32;

/// The one chain this server accepts transactions for.
///
/// Any request naming a chain id is checked against this value.
pub const TRANSACTION_CHAIN_ID: Bytes32 = Bytes32::new([
    0xcf, 0xfc, 0xe0, 0xf4, 0x09, 0xeb, 0xba, 0x4e, 0xd2, 0x36, 0xd4, 0x9d, 0x89, 0xc7, 0x0e, 0x4b,
    0xd1, 0xf1, 0x36, 0x7d, 0x86, 0x40, 0x2a, 0x33, 0x63, 0x36, 0x66, 0x83, 0x26, 0x5a, 0x24, 0x2d,
]);
