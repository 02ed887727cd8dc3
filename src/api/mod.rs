//! Workflows behind the RPC methods.
//!
//! Each workflow is written against the [crate::ledger::LedgerStore] and
//! [crate::chain::ChainClient] traits and reports failures with its own error
//! type. The RPC layer maps those onto wire errors.

pub mod history;
pub mod rich_list;
pub mod sync_status;
pub mod tx_submission;
