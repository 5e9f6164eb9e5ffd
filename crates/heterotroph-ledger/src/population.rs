//! The population ledger: shared ATP pool, organism count, and capabilities.
//!
//! All changes go through methods that journal the ATP movement and keep the
//! invariants: ATP never goes negative, the count is floored at zero, the
//! capability set only grows, and an extinct population is frozen.

use std::collections::BTreeSet;

use heterotroph_types::{AtpEntryType, Capability, PopulationStatus};
use tracing::{info, warn};

use crate::LedgerError;
use crate::conservation::{BalanceResult, verify_balance};
use crate::journal::AtpJournal;

/// The heterotroph community in one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationLedger {
    atp: u32,
    count: u32,
    unlocked: BTreeSet<Capability>,
    journal: AtpJournal,
}

impl PopulationLedger {
    /// Start a population with `count` organisms and `atp` units.
    ///
    /// Starting ATP is treated as an opening credit so the journal balances
    /// from the first turn.
    pub fn new(count: u32, atp: u32) -> Self {
        let mut journal = AtpJournal::new();
        if atp > 0 {
            journal
                .record(0, AtpEntryType::TransferYield, atp, "opening balance")
                .ok();
        }
        Self {
            atp,
            count,
            unlocked: BTreeSet::new(),
            journal,
        }
    }

    /// Shared ATP pool.
    pub const fn atp(&self) -> u32 {
        self.atp
    }

    /// Number of living organisms.
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// `count > 0`. Once false, stays false.
    pub const fn is_alive(&self) -> bool {
        self.count > 0
    }

    /// Whether a one-time capability has been unlocked.
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.unlocked.contains(&capability)
    }

    /// The unlocked capability set.
    pub const fn unlocked(&self) -> &BTreeSet<Capability> {
        &self.unlocked
    }

    /// The ATP journal.
    pub const fn journal(&self) -> &AtpJournal {
        &self.journal
    }

    fn ensure_alive(&self) -> Result<(), LedgerError> {
        if self.is_alive() {
            Ok(())
        } else {
            Err(LedgerError::PopulationExtinct)
        }
    }

    /// Add generated ATP to the pool.
    ///
    /// Zero is accepted and leaves no journal entry.
    pub fn credit(&mut self, turn: u64, amount: u32, reason: &str) -> Result<u32, LedgerError> {
        self.ensure_alive()?;
        if amount == 0 {
            return Ok(self.atp);
        }
        let new_atp = self
            .atp
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.journal
            .record(turn, AtpEntryType::TransferYield, amount, reason)?;
        self.atp = new_atp;
        Ok(self.atp)
    }

    /// Remove ATP from the pool for upkeep or evolution.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientAtp`] if `amount` exceeds the
    /// pool, and [`LedgerError::NotADebit`] if `entry_type` is not a debit
    /// category. The pool is unchanged on error.
    pub fn debit(
        &mut self,
        turn: u64,
        entry_type: AtpEntryType,
        amount: u32,
        reason: &str,
    ) -> Result<u32, LedgerError> {
        self.ensure_alive()?;
        if !entry_type.is_debit() {
            return Err(LedgerError::NotADebit(entry_type));
        }
        if amount == 0 {
            return Ok(self.atp);
        }
        let new_atp = self
            .atp
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientAtp {
                requested: amount,
                available: self.atp,
            })?;
        self.journal.record(turn, entry_type, amount, reason)?;
        self.atp = new_atp;
        Ok(self.atp)
    }

    /// Journal ATP that was generated but never reached the pool.
    pub fn discard(&mut self, turn: u64, amount: u32, reason: &str) -> Result<(), LedgerError> {
        if amount == 0 {
            return Ok(());
        }
        self.journal
            .record(turn, AtpEntryType::Discarded, amount, reason)?;
        Ok(())
    }

    /// Kill up to `deaths` organisms and return how many actually died.
    ///
    /// The count is floored at zero; reaching zero makes the population
    /// extinct.
    pub fn apply_attrition(&mut self, deaths: u32) -> u32 {
        let died = deaths.min(self.count);
        self.count = self.count.saturating_sub(died);
        if died > 0 && self.count == 0 {
            warn!(died, "population extinct");
        }
        died
    }

    /// Double the organism count.
    pub fn double(&mut self) -> Result<u32, LedgerError> {
        self.ensure_alive()?;
        self.count = self
            .count
            .checked_mul(2)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok(self.count)
    }

    /// Record a one-time capability. Returns `false` if it was already held.
    ///
    /// Repeatable capabilities are never recorded.
    pub fn unlock(&mut self, capability: Capability) -> bool {
        if capability.is_repeatable() {
            return false;
        }
        let added = self.unlocked.insert(capability);
        if added {
            info!(%capability, "capability unlocked");
        }
        added
    }

    /// Check the journal against the pool.
    pub fn verify_balance(&self) -> BalanceResult {
        let result = verify_balance(&self.journal, self.atp);
        if let BalanceResult::Anomaly(anomaly) = &result {
            warn!(%anomaly, "ATP journal out of balance");
        }
        result
    }

    /// Read-only projection for display.
    pub fn status(&self) -> PopulationStatus {
        PopulationStatus {
            atp: self.atp,
            count: self.count,
            alive: self.is_alive(),
            unlocked: self.unlocked.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_adds_and_journals() {
        let mut pop = PopulationLedger::new(1, 0);
        assert_eq!(pop.credit(1, 4, "glucose->oxygen").ok(), Some(4));
        assert_eq!(pop.journal().len(), 1);
        assert!(pop.verify_balance().is_balanced());
    }

    #[test]
    fn debit_never_goes_negative() {
        let mut pop = PopulationLedger::new(1, 2);
        let result = pop.debit(1, AtpEntryType::EvolutionCost, 3, "evolve:growth");
        assert_eq!(
            result.err(),
            Some(LedgerError::InsufficientAtp {
                requested: 3,
                available: 2,
            })
        );
        assert_eq!(pop.atp(), 2);
        assert!(pop.verify_balance().is_balanced());
    }

    #[test]
    fn debit_requires_debit_category() {
        let mut pop = PopulationLedger::new(1, 5);
        let result = pop.debit(1, AtpEntryType::TransferYield, 1, "wrong");
        assert_eq!(result.err(), Some(LedgerError::NotADebit(AtpEntryType::TransferYield)));
    }

    #[test]
    fn opening_balance_is_journaled() {
        let pop = PopulationLedger::new(3, 10);
        assert_eq!(pop.journal().len(), 1);
        assert!(pop.verify_balance().is_balanced());
    }

    #[test]
    fn attrition_floors_at_zero_and_kills() {
        let mut pop = PopulationLedger::new(3, 0);
        assert_eq!(pop.apply_attrition(1), 1);
        assert_eq!(pop.count(), 2);
        assert!(pop.is_alive());
        assert_eq!(pop.apply_attrition(10), 2);
        assert_eq!(pop.count(), 0);
        assert!(!pop.is_alive());
    }

    #[test]
    fn extinct_population_is_frozen() {
        let mut pop = PopulationLedger::new(1, 6);
        pop.apply_attrition(1);
        assert_eq!(pop.credit(2, 4, "x").err(), Some(LedgerError::PopulationExtinct));
        assert_eq!(
            pop.debit(2, AtpEntryType::Maintenance, 1, "x").err(),
            Some(LedgerError::PopulationExtinct)
        );
        assert_eq!(pop.double().err(), Some(LedgerError::PopulationExtinct));
        assert_eq!(pop.atp(), 6);
        assert_eq!(pop.count(), 0);
    }

    #[test]
    fn discard_leaves_pool_and_balance_untouched() {
        let mut pop = PopulationLedger::new(1, 0);
        assert!(pop.discard(1, 4, "population died").is_ok());
        assert_eq!(pop.atp(), 0);
        assert!(pop.verify_balance().is_balanced());
    }

    #[test]
    fn unlock_is_one_time_and_skips_repeatables() {
        let mut pop = PopulationLedger::new(1, 0);
        assert!(pop.unlock(Capability::ExoEnzymes));
        assert!(!pop.unlock(Capability::ExoEnzymes));
        assert!(!pop.unlock(Capability::Growth));
        assert!(pop.has_capability(Capability::ExoEnzymes));
        assert!(!pop.has_capability(Capability::Growth));
    }

    #[test]
    fn double_doubles() {
        let mut pop = PopulationLedger::new(3, 0);
        assert_eq!(pop.double().ok(), Some(6));
        assert_eq!(pop.double().ok(), Some(12));
    }

    #[test]
    fn status_projection() {
        let mut pop = PopulationLedger::new(2, 5);
        pop.unlock(Capability::Fermentation);
        let status = pop.status();
        assert_eq!(status.atp, 5);
        assert_eq!(status.count, 2);
        assert!(status.alive);
        assert!(status.unlocked.contains(&Capability::Fermentation));
    }
}
