use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use super::ticker::Ticker;
use super::ticker::UnknownTicker;

/// Amount (or rate) per ticker, in the smallest unit (1e-8).
///
/// Used for balances, issuance and rate snapshots alike. The wire form is a
/// JSON object keyed by the ticker's canonical symbol; see
/// [TickerMap::to_symbol_map] and [TickerMap::from_symbol_map].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickerMap(BTreeMap<Ticker, u64>);

impl TickerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, ticker: Ticker) -> Option<u64> {
        self.0.get(&ticker).copied()
    }

    pub fn insert(&mut self, ticker: Ticker, amount: u64) -> Option<u64> {
        self.0.insert(ticker, amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ticker, u64)> + '_ {
        self.0.iter().map(|(ticker, amount)| (*ticker, *amount))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_symbol_map(&self) -> BTreeMap<&'static str, u64> {
        self.iter()
            .map(|(ticker, amount)| (ticker.symbol(), amount))
            .collect()
    }

    pub fn from_symbol_map<K: AsRef<str>>(
        map: impl IntoIterator<Item = (K, u64)>,
    ) -> Result<Self, UnknownTicker> {
        map.into_iter()
            .map(|(symbol, amount)| Ticker::parse(symbol.as_ref()).map(|t| (t, amount)))
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(Self)
    }
}

impl FromIterator<(Ticker, u64)> for TickerMap {
    fn from_iter<I: IntoIterator<Item = (Ticker, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for TickerMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_symbol_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TickerMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = BTreeMap::<String, u64>::deserialize(deserializer)?;
        Self::from_symbol_map(map).map_err(serde::de::Error::custom)
    }
}
