//! The game: one session's registry, population, turn, and rule set.
//!
//! A [`Game`] is exclusively owned by whoever drives it. Every command takes
//! `&mut self`, runs to completion, and reports what happened. There is no
//! process-wide state; two sessions never share a game.

use std::collections::BTreeMap;

use heterotroph_ledger::PopulationLedger;
use heterotroph_types::{
    Capability, GameId, GameSnapshot, Outcome, PopulationStatus, Quantity, RejectionReason,
    ScenarioId, Substance, TransferPolicy,
};
use heterotroph_world::{ResourceRegistry, WorldError, scenario_spec};
use tracing::info;

use crate::config::RulesConfig;
use crate::error::EngineError;
use crate::evolution::{self, EvolutionOutcome};
use crate::maintenance::{self, MaintenanceReport};
use crate::outcome::evaluate_outcome;
use crate::transfer::{self, TransferOutcome};

/// Result of advancing the turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The turn advanced.
    Advanced {
        /// The new turn number.
        turn: u64,
        /// Upkeep paid at the boundary (all zero under `PerElectron`).
        maintenance: MaintenanceReport,
        /// Outcome after upkeep.
        outcome: Outcome,
    },
    /// Nothing changed.
    Rejected(RejectionReason),
}

/// One game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: GameId,
    scenario: ScenarioId,
    policy: TransferPolicy,
    turn: u64,
    pub(crate) resources: ResourceRegistry,
    pub(crate) population: PopulationLedger,
}

impl Game {
    /// Start a fresh game from a scenario's starting table.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidScenario`] for scenarios that are
    /// offered by name but have no rules.
    pub fn start(scenario: ScenarioId, rules: &RulesConfig) -> Result<Self, EngineError> {
        let spec = scenario_spec(scenario).map_err(|e| match e {
            WorldError::ScenarioUnimplemented(id) => EngineError::InvalidScenario(id),
            other => EngineError::from(other),
        })?;
        let resources = spec.build_registry()?;
        let population = PopulationLedger::new(spec.population, spec.atp);
        let game = Self::from_parts(scenario, rules.policy, resources, population);
        info!(
            game_id = %game.id,
            %scenario,
            policy = ?rules.policy,
            count = spec.population,
            atp = spec.atp,
            "game started"
        );
        Ok(game)
    }

    /// Assemble a game from explicit state, starting at turn 1.
    pub fn from_parts(
        scenario: ScenarioId,
        policy: TransferPolicy,
        resources: ResourceRegistry,
        population: PopulationLedger,
    ) -> Self {
        Self {
            id: GameId::new(),
            scenario,
            policy,
            turn: 1,
            resources,
            population,
        }
    }

    /// Session identifier.
    pub const fn id(&self) -> GameId {
        self.id
    }

    /// Scenario this game was started from.
    pub const fn scenario(&self) -> ScenarioId {
        self.scenario
    }

    /// Active rule set.
    pub const fn policy(&self) -> TransferPolicy {
        self.policy
    }

    /// Current turn, starting at 1.
    pub const fn turn(&self) -> u64 {
        self.turn
    }

    /// The resource registry.
    pub const fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    /// The population ledger.
    pub const fn population(&self) -> &PopulationLedger {
        &self.population
    }

    /// Move electrons from `donor` to `acceptor`.
    pub fn transfer_electron(
        &mut self,
        donor: Substance,
        acceptor: Substance,
    ) -> Result<TransferOutcome, EngineError> {
        transfer::transfer_electron(self, donor, acceptor)
    }

    /// Spend ATP on a capability.
    pub fn evolve(&mut self, capability: Capability) -> Result<EvolutionOutcome, EngineError> {
        evolution::evolve(self, capability)
    }

    /// Advance to the next turn, paying upkeep under `Batched` rules.
    pub fn advance_turn(&mut self) -> Result<TurnOutcome, EngineError> {
        if self.outcome()?.is_terminal() {
            return Ok(TurnOutcome::Rejected(RejectionReason::GameOver));
        }
        self.turn = self
            .turn
            .checked_add(1)
            .ok_or_else(|| EngineError::ArithmeticOverflow {
                context: String::from("turn counter overflow"),
            })?;
        let maintenance = maintenance::apply_maintenance(self)?;
        let outcome = self.outcome()?;
        info!(
            turn = self.turn,
            upkeep_paid = maintenance.paid,
            deaths = maintenance.deaths,
            ?outcome,
            "turn advanced"
        );
        Ok(TurnOutcome::Advanced {
            turn: self.turn,
            maintenance,
            outcome,
        })
    }

    /// Current win/loss state.
    pub fn outcome(&self) -> Result<Outcome, EngineError> {
        Ok(evaluate_outcome(&self.resources, &self.population)?)
    }

    /// Donor name to available stock.
    pub fn donor_table(&self) -> BTreeMap<Substance, Quantity> {
        self.resources.donors()
    }

    /// Acceptor name to available stock.
    pub fn acceptor_table(&self) -> BTreeMap<Substance, Quantity> {
        self.resources.acceptors()
    }

    /// ATP, count, alive flag, and unlocked capabilities.
    pub fn population_status(&self) -> PopulationStatus {
        self.population.status()
    }

    /// Everything a display layer needs for one frame.
    pub fn snapshot(&self) -> Result<GameSnapshot, EngineError> {
        Ok(GameSnapshot {
            game_id: self.id,
            scenario: self.scenario,
            policy: self.policy,
            turn: self.turn,
            donors: self.donor_table(),
            acceptors: self.acceptor_table(),
            population: self.population_status(),
            outcome: self.outcome()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::panic)]
    fn start(scenario: ScenarioId, policy: TransferPolicy) -> Game {
        Game::start(scenario, &RulesConfig { policy })
            .unwrap_or_else(|e| panic!("failed to start {scenario}: {e}"))
    }

    #[test]
    fn start_begins_at_turn_one() {
        let game = start(ScenarioId::UnlimitedOxygen, TransferPolicy::Batched);
        assert_eq!(game.turn(), 1);
        assert_eq!(game.population().count(), 1);
        assert_eq!(game.outcome().ok(), Some(Outcome::InProgress));
    }

    #[test]
    fn unimplemented_scenarios_are_invalid() {
        for id in [ScenarioId::OxygenPulse, ScenarioId::Photoautotroph] {
            let result = Game::start(id, &RulesConfig::default());
            assert!(matches!(result, Err(EngineError::InvalidScenario(s)) if s == id));
        }
    }

    #[test]
    fn advance_turn_increments_without_upkeep_under_per_electron() {
        let mut game = start(ScenarioId::UnlimitedOxygen, TransferPolicy::PerElectron);
        let result = game.advance_turn();
        assert!(matches!(
            result,
            Ok(TurnOutcome::Advanced { turn: 2, maintenance, .. }) if maintenance.required == 0
        ));
        assert_eq!(game.population().count(), 1);
    }

    #[test]
    fn separate_games_do_not_share_state() {
        let mut a = start(ScenarioId::OxygenLimiting, TransferPolicy::Batched);
        let b = start(ScenarioId::OxygenLimiting, TransferPolicy::Batched);
        assert_ne!(a.id(), b.id());
        assert!(a.transfer_electron(Substance::Glucose, Substance::Oxygen).is_ok());
        assert_ne!(a.donor_table(), b.donor_table());
    }

    #[test]
    fn snapshot_reflects_state() {
        let game = start(ScenarioId::OxygenLimiting, TransferPolicy::Batched);
        let snapshot = game.snapshot().ok();
        assert!(snapshot.is_some());
        let Some(snapshot) = snapshot else { return };
        assert_eq!(snapshot.turn, 1);
        assert_eq!(snapshot.acceptors.get(&Substance::Oxygen), Some(&Quantity::Finite(3)));
        assert_eq!(snapshot.donors.get(&Substance::Glucose), Some(&Quantity::Finite(6)));
        assert!(snapshot.population.alive);
    }
}
