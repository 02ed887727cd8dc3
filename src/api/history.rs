use serde::Serialize;
use thiserror::Error;

use crate::ledger::history::HistoryAction;
use crate::ledger::history::HistoryQueryOptions;
use crate::ledger::history::HistorySelector;
use crate::ledger::LedgerStore;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HistoryError {
    #[error("no transactions found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// One page of transaction history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryResult {
    pub actions: Vec<HistoryAction>,
    pub count: usize,
    /// Offset of the next page, or 0 when this page is the last one.
    pub nextoffset: usize,
}

/// `offset + returned` while that is short of `count`, else the sentinel 0.
pub fn next_offset(offset: usize, returned: usize, count: usize) -> usize {
    match offset.checked_add(returned) {
        Some(next) if next < count => next,
        _ => 0,
    }
}

pub async fn query_history(
    ledger: &dyn LedgerStore,
    selector: HistorySelector,
    options: HistoryQueryOptions,
) -> Result<HistoryResult, HistoryError> {
    let page = ledger.history(selector, options).await?;
    if page.actions.is_empty() {
        return Err(HistoryError::NotFound);
    }

    Ok(HistoryResult {
        nextoffset: next_offset(options.offset, page.actions.len(), page.count),
        actions: page.actions,
        count: page.count,
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use macro_rules_attr::apply;
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;
    use crate::ledger::history::HistoryActionKind;
    use crate::ledger::history::HISTORY_PAGE_LIMIT;
    use crate::ledger::memory::LedgerSnapshot;
    use crate::ledger::memory::MemoryLedger;
    use crate::protocol::address::FactoidAddress;
    use crate::tests::shared::history_action;
    use crate::tests::shared_tokio_runtime;

    #[proptest]
    fn next_offset_advances_or_ends(
        #[strategy(1usize..10_000)] count: usize,
        #[strategy(0usize..#count)] offset: usize,
        #[strategy(1usize..=HISTORY_PAGE_LIMIT)] page: usize,
    ) {
        let returned = page.min(count - offset);
        let next = next_offset(offset, returned, count);

        if offset + returned == count {
            prop_assert_eq!(0, next);
        } else {
            prop_assert!(next > offset);
            prop_assert!(next <= count);
        }
    }

    #[test]
    fn next_offset_at_the_end_is_zero() {
        assert_eq!(0, next_offset(0, 3, 3));
        assert_eq!(50, next_offset(0, 50, 120));
        assert_eq!(0, next_offset(100, 20, 120));
        assert_eq!(0, next_offset(usize::MAX, 1, 5));
    }

    fn ledger(actions: usize, height: u32) -> MemoryLedger {
        let from = FactoidAddress::from_payload([4; 32]);
        MemoryLedger::new(LedgerSnapshot {
            sync_height: height,
            actions: (0..actions as u64)
                .map(|i| history_action(i, height, HistoryActionKind::Transfer, from))
                .collect(),
            ..Default::default()
        })
    }

    #[apply(shared_tokio_runtime)]
    async fn single_page_has_no_next_offset() {
        let result = query_history(
            &ledger(3, 100),
            HistorySelector::Height(100),
            HistoryQueryOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(3, result.actions.len());
        assert_eq!(3, result.count);
        assert_eq!(0, result.nextoffset);
    }

    #[apply(shared_tokio_runtime)]
    async fn walks_every_page() {
        let ledger = ledger(120, 100);
        let mut options = HistoryQueryOptions::default();
        let mut seen = 0;

        loop {
            let result = query_history(&ledger, HistorySelector::Height(100), options)
                .await
                .unwrap();
            seen += result.actions.len();
            if result.nextoffset == 0 {
                break;
            }
            options.offset = result.nextoffset;
        }

        assert_eq!(120, seen);
    }

    #[apply(shared_tokio_runtime)]
    async fn empty_page_is_not_found() {
        let ledger = ledger(3, 100);

        let at_other_height = query_history(
            &ledger,
            HistorySelector::Height(101),
            HistoryQueryOptions::default(),
        )
        .await;
        let past_the_end = query_history(
            &ledger,
            HistorySelector::Height(100),
            HistoryQueryOptions {
                offset: 3,
                ..Default::default()
            },
        )
        .await;

        assert!(matches!(at_other_height, Err(HistoryError::NotFound)));
        assert!(matches!(past_the_end, Err(HistoryError::NotFound)));
    }
}
