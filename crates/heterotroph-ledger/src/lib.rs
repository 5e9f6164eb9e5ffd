//! Population ledger and ATP bookkeeping for the Heterotroph simulation.
//!
//! Every unit of ATP the population gains or spends is journaled. ATP is
//! never created from nothing (only electron transfer credits it) and never
//! destroyed into nothing (maintenance and evolution debit it). The balance
//! law is checked against the live pool on demand.
//!
//! # Architecture
//!
//! - [`population`] -- The [`PopulationLedger`]: ATP pool, organism count,
//!   unlocked capabilities, and the mutators the engines call.
//! - [`journal`] -- The [`AtpJournal`]: append-only log of ATP entries.
//! - [`conservation`] -- Balance law verification and anomaly reporting.
//!
//! # Balance Law
//!
//! ```text
//! sum(TransferYield) - sum(Maintenance + EvolutionCost) == atp
//! ```
//!
//! `Discarded` entries record ATP generated by a transfer that killed the
//! whole population. It was never credited, so it stays out of the sum.
//!
//! # Usage
//!
//! ```
//! use heterotroph_ledger::{BalanceResult, PopulationLedger};
//! use heterotroph_types::AtpEntryType;
//!
//! let mut population = PopulationLedger::new(1, 0);
//! population.credit(1, 8, "glucose->oxygen").ok();
//! population.debit(2, AtpEntryType::Maintenance, 1, "upkeep").ok();
//!
//! assert_eq!(population.atp(), 7);
//! assert_eq!(population.verify_balance(), BalanceResult::Balanced);
//! ```

pub mod conservation;
pub mod journal;
pub mod population;

// Re-export primary types at crate root.
pub use conservation::BalanceResult;
pub use journal::AtpJournal;
pub use population::PopulationLedger;

use heterotroph_types::AtpEntryType;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when changing the population or its journal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The ATP pool cannot cover a debit.
    #[error("insufficient ATP: wanted {requested} but pool holds {available}")]
    InsufficientAtp {
        /// Units requested.
        requested: u32,
        /// Units in the pool.
        available: u32,
    },

    /// Journal quantities must be strictly positive.
    #[error("journal entry quantity must be non-zero")]
    ZeroQuantity,

    /// The entry type does not match the recording method.
    #[error("{0:?} cannot be recorded as a debit")]
    NotADebit(AtpEntryType),

    /// The population is dead; its ATP and count are frozen.
    #[error("population is extinct")]
    PopulationExtinct,

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in ledger calculation")]
    ArithmeticOverflow,

    /// An internal error that should not occur in normal operation.
    #[error("internal ledger error: {0}")]
    InternalError(&'static str),
}

// ---------------------------------------------------------------------------
// Anomaly type
// ---------------------------------------------------------------------------

/// A balance law violation: the journal and the pool disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerAnomaly {
    /// Total credited according to the journal.
    pub credited: u64,
    /// Total debited according to the journal.
    pub debited: u64,
    /// The pool's actual balance.
    pub pool: u32,
    /// Human-readable description of the anomaly.
    pub message: String,
}

impl core::fmt::Display for LedgerAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}
