use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use strum::EnumIter;
use strum::EnumString;
use strum::IntoStaticStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ticker: {0:?}")]
pub struct UnknownTicker(pub String);

/// Registry of PegNet assets.
///
/// The discriminant is the asset's internal numeric code. It never appears on
/// the wire; the canonical symbol (`pUSD`, `PEG`, ...) does.
#[repr(u8)]
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, IntoStaticStr,
)]
pub enum Ticker {
    #[strum(serialize = "PEG")]
    Peg = 1,
    #[strum(serialize = "pUSD")]
    Usd = 2,
    #[strum(serialize = "pEUR")]
    Eur = 3,
    #[strum(serialize = "pJPY")]
    Jpy = 4,
    #[strum(serialize = "pGBP")]
    Gbp = 5,
    #[strum(serialize = "pCAD")]
    Cad = 6,
    #[strum(serialize = "pCHF")]
    Chf = 7,
    #[strum(serialize = "pINR")]
    Inr = 8,
    #[strum(serialize = "pSGD")]
    Sgd = 9,
    #[strum(serialize = "pCNY")]
    Cny = 10,
    #[strum(serialize = "pHKD")]
    Hkd = 11,
    #[strum(serialize = "pKRW")]
    Krw = 12,
    #[strum(serialize = "pBRL")]
    Brl = 13,
    #[strum(serialize = "pPHP")]
    Php = 14,
    #[strum(serialize = "pMXN")]
    Mxn = 15,
    #[strum(serialize = "pXAU")]
    Xau = 16,
    #[strum(serialize = "pXAG")]
    Xag = 17,
    #[strum(serialize = "pXBT")]
    Xbt = 18,
    #[strum(serialize = "pETH")]
    Eth = 19,
    #[strum(serialize = "pLTC")]
    Ltc = 20,
    #[strum(serialize = "pRVN")]
    Rvn = 21,
    #[strum(serialize = "pXBC")]
    Xbc = 22,
    #[strum(serialize = "pFCT")]
    Fct = 23,
    #[strum(serialize = "pBNB")]
    Bnb = 24,
    #[strum(serialize = "pXLM")]
    Xlm = 25,
    #[strum(serialize = "pADA")]
    Ada = 26,
    #[strum(serialize = "pXMR")]
    Xmr = 27,
    #[strum(serialize = "pDASH")]
    Dash = 28,
    #[strum(serialize = "pZEC")]
    Zec = 29,
    #[strum(serialize = "pDCR")]
    Dcr = 30,
    #[strum(serialize = "pAUD")]
    Aud = 31,
    #[strum(serialize = "pNZD")]
    Nzd = 32,
    #[strum(serialize = "pSEK")]
    Sek = 33,
    #[strum(serialize = "pNOK")]
    Nok = 34,
    #[strum(serialize = "pRUB")]
    Rub = 35,
    #[strum(serialize = "pZAR")]
    Zar = 36,
    #[strum(serialize = "pTRY")]
    Try = 37,
    #[strum(serialize = "pEOS")]
    Eos = 38,
    #[strum(serialize = "pLINK")]
    Link = 39,
    #[strum(serialize = "pATOM")]
    Atom = 40,
    #[strum(serialize = "pBAT")]
    Bat = 41,
    #[strum(serialize = "pXTZ")]
    Xtz = 42,
    #[strum(serialize = "pHBAR")]
    Hbar = 43,
    #[strum(serialize = "pNEO")]
    Neo = 44,
    #[strum(serialize = "pCRO")]
    Cro = 45,
    #[strum(serialize = "pETC")]
    Etc = 46,
    #[strum(serialize = "pONT")]
    Ont = 47,
    #[strum(serialize = "pDOGE")]
    Doge = 48,
    #[strum(serialize = "pVET")]
    Vet = 49,
    #[strum(serialize = "pHT")]
    Ht = 50,
    #[strum(serialize = "pALGO")]
    Algo = 51,
    #[strum(serialize = "pDGB")]
    Dgb = 52,
}

impl Ticker {
    /// Reference asset every balance is valued against.
    pub const USD: Ticker = Ticker::Usd;

    pub fn symbol(self) -> &'static str {
        self.into()
    }

    pub fn parse(symbol: &str) -> Result<Self, UnknownTicker> {
        Self::from_str(symbol).map_err(|_| UnknownTicker(symbol.to_string()))
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Serialize for Ticker {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for Ticker {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
