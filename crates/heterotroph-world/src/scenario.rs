//! Starting conditions for each selectable scenario.
//!
//! Each implemented scenario is one row of a static table giving the full
//! initial resource registry and population. Scenarios without rules
//! (`oxygen-pulse`, `photoautotroph`) have no row and fail fast.

use heterotroph_types::{Quantity, ScenarioId, Substance};

use crate::error::WorldError;
use crate::registry::{Resource, ResourceRegistry};

/// Helper to build a [`Resource`] row.
const fn row(substance: Substance, available: Quantity, usable: bool) -> Resource {
    Resource::new(substance, available, usable)
}

const fn units(n: u32) -> Quantity {
    Quantity::Finite(n)
}

/// Full initial state for one scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioSpec {
    /// The scenario this row describes.
    pub id: ScenarioId,
    /// One entry per substance.
    pub resources: [Resource; 10],
    /// Starting number of organisms.
    pub population: u32,
    /// Starting ATP pool.
    pub atp: u32,
}

impl ScenarioSpec {
    /// Build the resource registry this scenario starts with.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if the row is not a complete registry.
    pub fn build_registry(&self) -> Result<ResourceRegistry, WorldError> {
        ResourceRegistry::from_entries(self.resources.iter().cloned())
    }
}

/// Oxygen never runs out; the anaerobic acceptors are empty and locked.
static UNLIMITED_OXYGEN: ScenarioSpec = ScenarioSpec {
    id: ScenarioId::UnlimitedOxygen,
    resources: [
        row(Substance::Glucose, units(3), true),
        row(Substance::Cellulose, units(1), false),
        row(Substance::Lactate, units(0), true),
        row(Substance::Acetate, units(0), true),
        row(Substance::Hydrogen, units(0), true),
        row(Substance::Oxygen, Quantity::Unbounded, true),
        row(Substance::Nitrate, units(0), false),
        row(Substance::Iron, units(0), false),
        row(Substance::Sulfur, units(0), false),
        row(Substance::Co2, units(0), true),
    ],
    population: 1,
    atp: 0,
};

/// Three units of oxygen; nitrate, iron, and sulfur are stocked but locked
/// until the population evolves anaerobiosis.
static OXYGEN_LIMITING: ScenarioSpec = ScenarioSpec {
    id: ScenarioId::OxygenLimiting,
    resources: [
        row(Substance::Glucose, units(6), true),
        row(Substance::Cellulose, units(2), false),
        row(Substance::Lactate, units(0), true),
        row(Substance::Acetate, units(0), true),
        row(Substance::Hydrogen, units(0), true),
        row(Substance::Oxygen, units(3), true),
        row(Substance::Nitrate, units(5), false),
        row(Substance::Iron, units(5), false),
        row(Substance::Sulfur, units(5), false),
        row(Substance::Co2, units(4), true),
    ],
    population: 1,
    atp: 0,
};

/// Look up the starting conditions for `id`.
///
/// # Errors
///
/// Returns [`WorldError::ScenarioUnimplemented`] for scenarios that are
/// offered by name but have no rules.
pub fn scenario_spec(id: ScenarioId) -> Result<&'static ScenarioSpec, WorldError> {
    match id {
        ScenarioId::UnlimitedOxygen => Ok(&UNLIMITED_OXYGEN),
        ScenarioId::OxygenLimiting => Ok(&OXYGEN_LIMITING),
        ScenarioId::OxygenPulse | ScenarioId::Photoautotroph => {
            Err(WorldError::ScenarioUnimplemented(id))
        }
    }
}
