//! Balance law verification for the ATP journal.
//!
//! The journal and the live pool are kept separately, so the check below
//! catches any mutation path that changed the pool without journaling it:
//!
//! ```text
//! sum(credits) - sum(debits) == pool
//! ```

use heterotroph_types::AtpEntryType;

use crate::LedgerAnomaly;
use crate::journal::AtpJournal;

/// The result of a balance check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceResult {
    /// Journal and pool agree.
    Balanced,
    /// Journal and pool disagree.
    Anomaly(LedgerAnomaly),
}

impl BalanceResult {
    /// Whether the check passed.
    pub const fn is_balanced(&self) -> bool {
        matches!(self, Self::Balanced)
    }
}

/// Verify that `journal` explains the current `pool` exactly.
pub fn verify_balance(journal: &AtpJournal, pool: u32) -> BalanceResult {
    let (Some(credited), Some(debited)) = (
        journal.total_where(AtpEntryType::is_credit),
        journal.total_where(AtpEntryType::is_debit),
    ) else {
        return BalanceResult::Anomaly(LedgerAnomaly {
            credited: u64::MAX,
            debited: u64::MAX,
            pool,
            message: "ATP journal totals overflowed".to_owned(),
        });
    };

    let expected = credited.checked_sub(debited);
    if expected == Some(u64::from(pool)) {
        return BalanceResult::Balanced;
    }

    BalanceResult::Anomaly(LedgerAnomaly {
        credited,
        debited,
        pool,
        message: format!(
            "ATP_IMBALANCE: journal credits {credited} - debits {debited} != pool {pool}"
        ),
    })
}
