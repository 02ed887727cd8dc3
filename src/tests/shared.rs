//! Fixtures shared by unit tests: a scriptable chain client, history actions
//! and a seeded ledger behind a ready [RpcServer].

use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use async_trait::async_trait;
use serde_json::json;

use crate::application::json_rpc::server::rpc::RpcServer;
use crate::chain::ChainClient;
use crate::ledger::history::HistoryAction;
use crate::ledger::history::HistoryActionKind;
use crate::ledger::history::HistoryOutput;
use crate::ledger::memory::LedgerSnapshot;
use crate::ledger::memory::MemoryLedger;
use crate::protocol::address::EntryCreditAddress;
use crate::protocol::address::EntryCreditSecret;
use crate::protocol::address::FactoidAddress;
use crate::protocol::bytes::Bytes32;
use crate::protocol::conversions::PRECISION;
use crate::protocol::entry::Entry;
use crate::protocol::ticker::Ticker;
use crate::protocol::ticker_map::TickerMap;
use crate::protocol::TRANSACTION_CHAIN_ID;

/// Transaction id every successful [MockChain] submission returns.
pub const MOCK_TXID: Bytes32 = Bytes32::new([0x77; 32]);

/// Sync height of [seeded_ledger].
pub const SEEDED_HEIGHT: u32 = 100;

/// In-memory [ChainClient] with call counters.
#[derive(Debug, Default)]
pub struct MockChain {
    height: Option<u32>,
    balance: AtomicU64,
    entries: HashMap<Bytes32, Entry>,
    reject_submissions: bool,
    spend_on_submit: bool,
    submit_delay: Option<Duration>,
    pub balance_calls: AtomicUsize,
    pub submit_calls: AtomicUsize,
}

impl MockChain {
    pub fn at_height(height: u32) -> Self {
        Self {
            height: Some(height),
            ..Default::default()
        }
    }

    /// Every call fails.
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn with_balance(self, balance: u64) -> Self {
        self.balance.store(balance, Ordering::SeqCst);
        self
    }

    pub fn with_entry(mut self, entry: Entry) -> Self {
        let hash = entry.hash().expect("fixture entry hashes");
        self.entries.insert(hash, entry);
        self
    }

    pub fn rejecting_submissions(mut self) -> Self {
        self.reject_submissions = true;
        self
    }

    /// Deduct the entry's cost from the balance on every submission.
    pub fn spending_on_submit(mut self) -> Self {
        self.spend_on_submit = true;
        self
    }

    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = Some(delay);
        self
    }

    fn reachable_height(&self) -> anyhow::Result<u32> {
        match self.height {
            Some(height) => Ok(height),
            None => bail!("connection refused"),
        }
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn current_height(&self) -> anyhow::Result<u32> {
        self.reachable_height()
    }

    async fn entry_credit_balance(&self, _address: &EntryCreditAddress) -> anyhow::Result<u64> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        self.reachable_height()?;
        Ok(self.balance.load(Ordering::SeqCst))
    }

    async fn entry(&self, entry_hash: &Bytes32) -> anyhow::Result<Option<Entry>> {
        self.reachable_height()?;
        Ok(self.entries.get(entry_hash).cloned())
    }

    async fn submit_entry(
        &self,
        entry: &Entry,
        _credential: &EntryCreditSecret,
    ) -> anyhow::Result<Bytes32> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.reachable_height()?;
        if let Some(delay) = self.submit_delay {
            tokio::time::sleep(delay).await;
        }
        if self.reject_submissions {
            bail!("commit rejected");
        }
        if self.spend_on_submit {
            let cost = u64::from(entry.cost()?);
            self.balance.fetch_sub(cost, Ordering::SeqCst);
        }

        Ok(MOCK_TXID)
    }
}

fn numbered_hash(n: u64) -> Bytes32 {
    let mut bytes = [0u8; 32];
    bytes[24..].copy_from_slice(&n.to_be_bytes());
    Bytes32::new(bytes)
}

/// A history action with an entry hash ordered by `n`.
pub fn history_action(
    n: u64,
    height: u32,
    kind: HistoryActionKind,
    from: FactoidAddress,
) -> HistoryAction {
    let (to_asset, to_amount) = match kind {
        HistoryActionKind::Conversion => (Some(Ticker::Peg), Some(n * 10)),
        _ => (None, None),
    };

    HistoryAction {
        entry_hash: numbered_hash(n),
        tx_index: 0,
        height,
        timestamp: 1_600_000_000 + i64::from(height),
        executed: true,
        kind,
        from_address: from,
        from_asset: Ticker::Usd,
        from_amount: n + 1,
        to_asset,
        to_amount,
        outputs: vec![],
    }
}

pub fn funded_address() -> FactoidAddress {
    FactoidAddress::from_payload([0x11; 32])
}

pub fn payee_address() -> FactoidAddress {
    FactoidAddress::from_payload([0x22; 32])
}

pub fn funding_credential() -> EntryCreditSecret {
    EntryCreditSecret::from_payload([0x33; 32])
}

/// A transfer and a conversion from [funded_address] on the transaction
/// chain.
pub fn sample_entry() -> Entry {
    let content = json!({
        "version": 1,
        "transactions": [
            {
                "input": {"address": funded_address(), "amount": 5 * PRECISION, "type": "pUSD"},
                "transfers": [{"address": payee_address(), "amount": 5 * PRECISION}]
            },
            {
                "input": {"address": funded_address(), "amount": PRECISION, "type": "pUSD"},
                "conversion": "PEG"
            }
        ]
    });

    Entry {
        chain_id: TRANSACTION_CHAIN_ID,
        ext_ids: vec![b"signature".to_vec()],
        content: serde_json::to_vec(&content).expect("fixture content"),
    }
}

/// Ledger at [SEEDED_HEIGHT] holding balances of [funded_address] and
/// [payee_address], rates, issuance and the three actions of [sample_entry].
pub fn seeded_ledger() -> MemoryLedger {
    let entry_hash = sample_entry().hash().expect("fixture entry hashes");

    let mut transfer = history_action(0, SEEDED_HEIGHT, HistoryActionKind::Transfer, funded_address());
    transfer.outputs = vec![HistoryOutput {
        address: payee_address(),
        amount: 5 * PRECISION,
    }];
    let conversion = history_action(1, SEEDED_HEIGHT, HistoryActionKind::Conversion, funded_address());
    let coinbase = history_action(2, SEEDED_HEIGHT, HistoryActionKind::Coinbase, payee_address());
    let actions = [transfer, conversion, coinbase]
        .into_iter()
        .enumerate()
        .map(|(i, mut action)| {
            action.entry_hash = entry_hash;
            action.tx_index = i as u64;
            action
        })
        .collect();

    let balances: TickerMap = [(Ticker::Peg, 500 * PRECISION), (Ticker::Usd, 20 * PRECISION)]
        .into_iter()
        .collect();
    let payee_balances: TickerMap = [(Ticker::Usd, 5 * PRECISION)].into_iter().collect();
    let rates: TickerMap = [(Ticker::Usd, PRECISION), (Ticker::Peg, PRECISION / 100)]
        .into_iter()
        .collect();
    let issuance: TickerMap = [(Ticker::Peg, 1_000 * PRECISION), (Ticker::Usd, 25 * PRECISION)]
        .into_iter()
        .collect();

    MemoryLedger::new(LedgerSnapshot {
        sync_height: SEEDED_HEIGHT,
        balances: [
            (funded_address(), balances),
            (payee_address(), payee_balances),
        ]
        .into_iter()
        .collect(),
        issuance: Some(issuance),
        rates: [(SEEDED_HEIGHT, rates)].into_iter().collect(),
        actions,
    })
}

/// Server over [seeded_ledger] and `chain`, funded by [funding_credential].
pub fn test_rpc_server(chain: MockChain) -> RpcServer {
    RpcServer::new(
        Arc::new(seeded_ledger()),
        Arc::new(chain),
        Some(funding_credential()),
    )
}

/// A chain two blocks past [SEEDED_HEIGHT] that knows [sample_entry] and
/// has credits.
pub fn healthy_chain() -> MockChain {
    MockChain::at_height(SEEDED_HEIGHT + 2)
        .with_balance(1_000)
        .with_entry(sample_entry())
}
