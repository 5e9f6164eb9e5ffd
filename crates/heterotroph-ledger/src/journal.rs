//! The ATP journal: an append-only log of every ATP movement.
//!
//! Entries are never modified or deleted. Quantities are always positive;
//! a zero-unit movement is not an event and is rejected.

use chrono::Utc;

use heterotroph_types::{AtpEntry, AtpEntryId, AtpEntryType};

use crate::LedgerError;

/// Append-only record of ATP credits, debits, and discards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtpJournal {
    entries: Vec<AtpEntry>,
}

impl AtpJournal {
    /// Create an empty journal.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of entries.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a validated entry and return it.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ZeroQuantity`] if `quantity` is zero.
    pub fn record(
        &mut self,
        turn: u64,
        entry_type: AtpEntryType,
        quantity: u32,
        reason: impl Into<String>,
    ) -> Result<&AtpEntry, LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::ZeroQuantity);
        }
        self.entries.push(AtpEntry {
            id: AtpEntryId::new(),
            turn,
            entry_type,
            quantity,
            reason: reason.into(),
            recorded_at: Utc::now(),
        });
        self.entries
            .last()
            .ok_or(LedgerError::InternalError(
                "failed to retrieve entry after append",
            ))
    }

    /// Entries recorded during `turn`.
    pub fn entries_for_turn(&self, turn: u64) -> Vec<&AtpEntry> {
        self.entries.iter().filter(|e| e.turn == turn).collect()
    }

    /// All entries in insertion order.
    pub fn all_entries(&self) -> &[AtpEntry] {
        &self.entries
    }

    /// Sum of all entries matching `pred`, widened so it cannot overflow
    /// for any realistic journal.
    pub(crate) fn total_where(&self, pred: impl Fn(AtpEntryType) -> bool) -> Option<u64> {
        self.entries
            .iter()
            .filter(|e| pred(e.entry_type))
            .try_fold(0_u64, |acc, e| acc.checked_add(u64::from(e.quantity)))
    }
}
