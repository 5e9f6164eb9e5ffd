//! The resource registry: every donor and acceptor with its current stock.
//!
//! A [`Resource`] derives its kind, ATP yield, and periodicity from its
//! [`Substance`]; only stock and the `usable` flag change during play, and
//! only through [`ResourceRegistry`] methods. `usable` never goes from true
//! back to false.

use std::collections::BTreeMap;

use heterotroph_types::{Periodicity, Quantity, ResourceKind, Substance};
use tracing::debug;

use crate::error::WorldError;

/// One donor or acceptor entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    substance: Substance,
    available: Quantity,
    usable: bool,
}

impl Resource {
    /// Build an entry. Kind, yield, and periodicity come from `substance`.
    pub const fn new(substance: Substance, available: Quantity, usable: bool) -> Self {
        Self {
            substance,
            available,
            usable,
        }
    }

    /// The substance this entry tracks.
    pub const fn substance(&self) -> Substance {
        self.substance
    }

    /// Donor or acceptor.
    pub const fn kind(&self) -> ResourceKind {
        self.substance.kind()
    }

    /// ATP generated per electron accepted (zero for donors).
    pub const fn atp_per_electron(&self) -> u32 {
        self.substance.atp_per_electron()
    }

    /// Turn constraint on using this resource.
    pub const fn periodicity(&self) -> Periodicity {
        self.substance.periodicity()
    }

    /// Current stock.
    pub const fn available(&self) -> Quantity {
        self.available
    }

    /// Whether the resource may take part in a transfer.
    pub const fn is_usable(&self) -> bool {
        self.usable
    }
}

/// Every resource in one game, keyed by substance.
///
/// A registry always holds exactly one entry per [`Substance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRegistry {
    resources: BTreeMap<Substance, Resource>,
}

impl ResourceRegistry {
    /// Build a registry from a complete set of entries.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateResource`] if a substance appears
    /// twice and [`WorldError::MissingResource`] if one is absent.
    pub fn from_entries(entries: impl IntoIterator<Item = Resource>) -> Result<Self, WorldError> {
        let mut resources = BTreeMap::new();
        for entry in entries {
            let substance = entry.substance();
            if resources.insert(substance, entry).is_some() {
                return Err(WorldError::DuplicateResource(substance));
            }
        }
        if let Some(missing) = Substance::ALL
            .into_iter()
            .find(|s| !resources.contains_key(s))
        {
            return Err(WorldError::MissingResource(missing));
        }
        Ok(Self { resources })
    }

    /// Look up an entry.
    pub fn get(&self, substance: Substance) -> Result<&Resource, WorldError> {
        self.resources
            .get(&substance)
            .ok_or(WorldError::MissingResource(substance))
    }

    fn get_mut(&mut self, substance: Substance) -> Result<&mut Resource, WorldError> {
        self.resources
            .get_mut(&substance)
            .ok_or(WorldError::MissingResource(substance))
    }

    /// Remove `amount` units of stock, returning what remains.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfStock`] if `amount` exceeds the stock.
    /// The registry is unchanged in that case.
    pub fn consume(&mut self, substance: Substance, amount: u32) -> Result<Quantity, WorldError> {
        let entry = self.get_mut(substance)?;
        let remaining =
            entry
                .available
                .checked_sub(amount)
                .ok_or(WorldError::OutOfStock {
                    substance,
                    requested: amount,
                    available: entry.available,
                })?;
        entry.available = remaining;
        Ok(remaining)
    }

    /// Set whether a resource may be used.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UsableRevoked`] when asked to lock a resource
    /// that is already usable.
    pub fn set_usable(&mut self, substance: Substance, usable: bool) -> Result<(), WorldError> {
        let entry = self.get_mut(substance)?;
        if entry.usable && !usable {
            return Err(WorldError::UsableRevoked(substance));
        }
        if !entry.usable && usable {
            debug!(%substance, "resource unlocked");
        }
        entry.usable = usable;
        Ok(())
    }

    /// Overwrite the stock of a resource.
    pub fn set_available(&mut self, substance: Substance, available: Quantity) -> Result<(), WorldError> {
        self.get_mut(substance)?.available = available;
        Ok(())
    }

    /// Make each acceptor usable and reset its stock to `amount`.
    ///
    /// All names are checked before anything is changed.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NotAnAcceptor`] if any name is a donor.
    pub fn unlock_acceptors(&mut self, names: &[Substance], amount: u32) -> Result<(), WorldError> {
        if let Some(donor) = names
            .iter()
            .copied()
            .find(|s| s.kind() != ResourceKind::Acceptor)
        {
            return Err(WorldError::NotAnAcceptor(donor));
        }
        for &substance in names {
            self.set_usable(substance, true)?;
            self.set_available(substance, Quantity::Finite(amount))?;
        }
        Ok(())
    }

    /// Total stock across all donors. Unbounded if any donor is.
    pub fn donor_total(&self) -> Result<Quantity, WorldError> {
        self.resources
            .values()
            .filter(|r| r.kind() == ResourceKind::Donor)
            .try_fold(Quantity::ZERO, |acc, r| {
                acc.checked_add(r.available)
                    .ok_or(WorldError::ArithmeticOverflow)
            })
    }

    fn table(&self, kind: ResourceKind) -> BTreeMap<Substance, Quantity> {
        self.resources
            .values()
            .filter(|r| r.kind() == kind)
            .map(|r| (r.substance, r.available))
            .collect()
    }

    /// Donor name to available stock.
    pub fn donors(&self) -> BTreeMap<Substance, Quantity> {
        self.table(ResourceKind::Donor)
    }

    /// Acceptor name to available stock.
    pub fn acceptors(&self) -> BTreeMap<Substance, Quantity> {
        self.table(ResourceKind::Acceptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::unreachable)]
    fn registry() -> ResourceRegistry {
        let entries = Substance::ALL.into_iter().map(|s| match s {
            Substance::Glucose => Resource::new(s, Quantity::Finite(3), true),
            Substance::Cellulose => Resource::new(s, Quantity::Finite(1), false),
            Substance::Oxygen => Resource::new(s, Quantity::Unbounded, true),
            Substance::Nitrate | Substance::Iron | Substance::Sulfur => {
                Resource::new(s, Quantity::ZERO, false)
            }
            _ => Resource::new(s, Quantity::ZERO, true),
        });
        ResourceRegistry::from_entries(entries).unwrap_or_else(|e| {
            unreachable!("test registry is complete: {e}");
        })
    }

    #[test]
    fn rejects_incomplete_registry() {
        let result = ResourceRegistry::from_entries([Resource::new(
            Substance::Glucose,
            Quantity::Finite(1),
            true,
        )]);
        assert_eq!(result.err(), Some(WorldError::MissingResource(Substance::Cellulose)));
    }

    #[test]
    fn rejects_duplicate_entries() {
        let entries = Substance::ALL
            .into_iter()
            .map(|s| Resource::new(s, Quantity::ZERO, true))
            .chain([Resource::new(Substance::Iron, Quantity::ZERO, true)]);
        let result = ResourceRegistry::from_entries(entries);
        assert_eq!(result.err(), Some(WorldError::DuplicateResource(Substance::Iron)));
    }

    #[test]
    fn consume_reduces_stock() {
        let mut reg = registry();
        assert_eq!(reg.consume(Substance::Glucose, 2).ok(), Some(Quantity::Finite(1)));
        assert_eq!(
            reg.get(Substance::Glucose).ok().map(Resource::available),
            Some(Quantity::Finite(1))
        );
    }

    #[test]
    fn consume_beyond_stock_is_out_of_stock_and_unchanged() {
        let mut reg = registry();
        let result = reg.consume(Substance::Glucose, 4);
        assert!(matches!(result, Err(WorldError::OutOfStock { requested: 4, .. })));
        assert_eq!(
            reg.get(Substance::Glucose).ok().map(Resource::available),
            Some(Quantity::Finite(3))
        );
    }

    #[test]
    fn unbounded_stock_never_runs_out() {
        let mut reg = registry();
        for _ in 0..100 {
            assert!(reg.consume(Substance::Oxygen, 1_000).is_ok());
        }
        assert_eq!(
            reg.get(Substance::Oxygen).ok().map(Resource::available),
            Some(Quantity::Unbounded)
        );
    }

    #[test]
    fn usable_cannot_be_revoked() {
        let mut reg = registry();
        assert_eq!(
            reg.set_usable(Substance::Glucose, false),
            Err(WorldError::UsableRevoked(Substance::Glucose))
        );
        assert!(reg.set_usable(Substance::Cellulose, true).is_ok());
        assert_eq!(
            reg.set_usable(Substance::Cellulose, false),
            Err(WorldError::UsableRevoked(Substance::Cellulose))
        );
    }

    #[test]
    fn unlock_acceptors_sets_usable_and_stock() {
        let mut reg = registry();
        assert!(reg.unlock_acceptors(&Substance::ANAEROBIC_ACCEPTORS, 5).is_ok());
        for s in Substance::ANAEROBIC_ACCEPTORS {
            let entry = reg.get(s).ok();
            assert_eq!(entry.map(Resource::is_usable), Some(true));
            assert_eq!(entry.map(Resource::available), Some(Quantity::Finite(5)));
        }
    }

    #[test]
    fn unlock_acceptors_refuses_donors_without_partial_change() {
        let mut reg = registry();
        let result = reg.unlock_acceptors(&[Substance::Nitrate, Substance::Glucose], 5);
        assert_eq!(result, Err(WorldError::NotAnAcceptor(Substance::Glucose)));
        assert_eq!(
            reg.get(Substance::Nitrate).ok().map(Resource::is_usable),
            Some(false)
        );
    }

    #[test]
    fn donor_total_sums_finite_donors() {
        let mut reg = registry();
        assert_eq!(reg.donor_total().ok(), Some(Quantity::Finite(4)));
        assert!(reg.consume(Substance::Glucose, 3).is_ok());
        assert!(reg.consume(Substance::Cellulose, 1).is_ok());
        assert_eq!(reg.donor_total().ok(), Some(Quantity::ZERO));
    }

    #[test]
    fn tables_split_by_kind() {
        let reg = registry();
        let donors = reg.donors();
        let acceptors = reg.acceptors();
        assert_eq!(donors.len(), 5);
        assert_eq!(acceptors.len(), 5);
        assert_eq!(acceptors.get(&Substance::Oxygen), Some(&Quantity::Unbounded));
        assert!(!donors.contains_key(&Substance::Oxygen));
    }
}
