//! Turn-boundary upkeep under the batched rule set.
//!
//! Each organism costs one ATP per turn. Organisms the pool cannot pay for
//! die. Under per-electron rules starvation happens during transfers, so
//! this step does nothing.

use heterotroph_types::AtpEntryType;
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::game::Game;

/// What the upkeep step did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    /// ATP owed: one per living organism.
    pub required: u32,
    /// ATP actually debited.
    pub paid: u32,
    /// Organisms that died for lack of ATP.
    pub deaths: u32,
}

/// Charge upkeep for the turn that just started.
pub fn apply_maintenance(game: &mut Game) -> Result<MaintenanceReport, EngineError> {
    if !game.policy().has_maintenance() || !game.population.is_alive() {
        return Ok(MaintenanceReport::default());
    }

    let required = game.population.count();
    let paid = game.population.atp().min(required);
    let turn = game.turn();

    game.population
        .debit(turn, AtpEntryType::Maintenance, paid, "upkeep")?;
    let deaths = game
        .population
        .apply_attrition(required.saturating_sub(paid));

    if deaths > 0 {
        warn!(turn, required, paid, deaths, "upkeep shortfall");
    } else {
        debug!(turn, paid, "upkeep paid");
    }

    Ok(MaintenanceReport {
        required,
        paid,
        deaths,
    })
}
