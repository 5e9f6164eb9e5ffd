//! Win/loss evaluation.

use heterotroph_ledger::PopulationLedger;
use heterotroph_types::Outcome;
use heterotroph_world::{ResourceRegistry, WorldError};

/// Decide the game state from the registry and population.
///
/// Every donor used up is a win, even if the last transfer also killed the
/// population. Otherwise an extinct population is a loss.
pub fn evaluate_outcome(
    resources: &ResourceRegistry,
    population: &PopulationLedger,
) -> Result<Outcome, WorldError> {
    if resources.donor_total()?.is_zero() {
        return Ok(Outcome::Win);
    }
    if !population.is_alive() {
        return Ok(Outcome::Loss);
    }
    Ok(Outcome::InProgress)
}
