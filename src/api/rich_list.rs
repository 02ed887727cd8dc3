//! Ranks addresses by the USD value of their holdings.

use serde::Serialize;
use serde::Serializer;
use thiserror::Error;
use tracing::debug;

use crate::ledger::LedgerStore;
use crate::protocol::address::FactoidAddress;
use crate::protocol::conversions::convert;
use crate::protocol::conversions::PRECISION;
use crate::protocol::ticker::Ticker;
use crate::protocol::ticker_map::TickerMap;

/// Number of addresses in a rich list.
pub const RICH_LIST_SIZE: usize = 100;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RichListError {
    #[error("no rates stored for height {0}")]
    NoRates(u32),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RichEntry {
    pub address: FactoidAddress,
    /// USD value in 1e-8 units. Rendered as a decimal on the wire.
    #[serde(serialize_with = "serialize_fixed_point")]
    pub usdequiv: u64,
}

fn serialize_fixed_point<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(*value as f64 / PRECISION as f64)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RichList {
    pub height: u32,
    pub top100: Vec<RichEntry>,
}

/// Total value of `balances` in pUSD at `rates`.
///
/// Tickers without a rate, or with a zero rate, add nothing. A holding whose
/// converted value overflows 64 bits is valued at 0, so an address holding
/// nothing else drops out of the ranking. Adding up the holdings saturates.
pub fn usd_value(balances: &TickerMap, rates: &TickerMap) -> u64 {
    let Some(usd_rate) = rates.get(Ticker::USD) else {
        return 0;
    };

    balances
        .iter()
        .filter_map(|(ticker, amount)| {
            let rate = rates.get(ticker)?;
            convert(amount, rate, usd_rate).ok()
        })
        .fold(0u64, u64::saturating_add)
}

/// Drops empty holdings and keeps the [RICH_LIST_SIZE] largest, largest
/// first. Ties keep their input order.
pub fn rank(mut entries: Vec<RichEntry>) -> Vec<RichEntry> {
    entries.retain(|e| e.usdequiv > 0);
    entries.sort_by(|a, b| b.usdequiv.cmp(&a.usdequiv));
    entries.truncate(RICH_LIST_SIZE);
    entries
}

pub async fn rich_list(ledger: &dyn LedgerStore) -> Result<RichList, RichListError> {
    let height = ledger.sync_height().await;
    let addresses = ledger.addresses().await?;
    let rates = ledger
        .rates(height)
        .await?
        .filter(|r| !r.is_empty())
        .ok_or(RichListError::NoRates(height))?;

    let mut entries = Vec::with_capacity(addresses.len());
    for address in addresses {
        let Some(balances) = ledger.balances(&address).await? else {
            continue;
        };
        entries.push(RichEntry {
            address,
            usdequiv: usd_value(&balances, &rates),
        });
    }
    debug!("valued {} addresses at height {height}", entries.len());

    Ok(RichList {
        height,
        top100: rank(entries),
    })
}
