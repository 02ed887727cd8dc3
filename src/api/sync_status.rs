use serde::Serialize;
use tracing::warn;

use crate::chain::ChainClient;
use crate::ledger::LedgerStore;

/// Reported in place of the factom height when the node cannot be reached.
pub const UNKNOWN_HEIGHT: i32 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SyncStatus {
    pub syncheight: u32,
    pub factomheight: i32,
}

/// Never fails: a chain client error only blanks out the factom height.
pub async fn sync_status(ledger: &dyn LedgerStore, chain: &dyn ChainClient) -> SyncStatus {
    let syncheight = ledger.sync_height().await;
    let factomheight = match chain.current_height().await {
        Ok(height) => i32::try_from(height).unwrap_or(i32::MAX),
        Err(e) => {
            warn!("could not fetch factom height: {e:#}");
            UNKNOWN_HEIGHT
        }
    };

    SyncStatus {
        syncheight,
        factomheight,
    }
}
