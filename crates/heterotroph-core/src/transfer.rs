//! Electron transfer: oxidize a donor, reduce an acceptor, make ATP.
//!
//! Two rule sets exist and a game uses exactly one:
//!
//! - [`TransferPolicy::PerElectron`] moves one electron per call. The ATP
//!   is shared across the population; if the yield is smaller than the
//!   population, the organisms left with nothing die on the spot. Every
//!   acceptor yields at least 1 ATP, so at least one organism always
//!   survives; the discard path for a wiped-out population only guards
//!   the ledger should a zero-yield acceptor ever appear.
//! - [`TransferPolicy::Batched`] moves `min(count, donor, acceptor)`
//!   electrons and credits all of it. Starvation is handled at the turn
//!   boundary by the maintenance step.
//!
//! A transfer that fails a gate (wrong kind, locked, empty, wrong turn) is
//! a no-op and reports the [`RejectionReason`].

use heterotroph_types::{Outcome, RejectionReason, ResourceKind, Substance, TransferPolicy};
use tracing::{debug, info};

use crate::error::EngineError;
use crate::game::Game;

/// What a successful transfer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferReport {
    /// Donor oxidized.
    pub donor: Substance,
    /// Acceptor reduced.
    pub acceptor: Substance,
    /// Electrons moved (units consumed from each side).
    pub electrons: u32,
    /// ATP produced by the transfer.
    pub atp_generated: u32,
    /// ATP that reached the pool (zero if the population died).
    pub atp_credited: u32,
    /// Organisms that died because their share was zero.
    pub deaths: u32,
    /// Outcome after the transfer.
    pub outcome: Outcome,
}

/// Result of a transfer command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Electrons moved.
    Applied(TransferReport),
    /// Nothing changed.
    Rejected(RejectionReason),
}

impl TransferOutcome {
    /// Whether the transfer changed the game.
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Check every precondition. `Some(reason)` means the transfer is a no-op.
fn check_gates(
    game: &Game,
    donor: Substance,
    acceptor: Substance,
) -> Result<Option<RejectionReason>, EngineError> {
    if donor.kind() != ResourceKind::Donor {
        return Ok(Some(RejectionReason::NotADonor));
    }
    if acceptor.kind() != ResourceKind::Acceptor {
        return Ok(Some(RejectionReason::NotAnAcceptor));
    }

    let d = game.resources.get(donor)?;
    let a = game.resources.get(acceptor)?;

    if !d.is_usable() || !a.is_usable() {
        return Ok(Some(RejectionReason::CapabilityLocked));
    }
    if d.available().is_zero() || a.available().is_zero() {
        return Ok(Some(RejectionReason::OutOfStock));
    }
    if !a.periodicity().permits(game.turn()) {
        return Ok(Some(RejectionReason::WrongTurnParity));
    }
    Ok(None)
}

/// Number of electrons this call moves under the game's policy.
fn electrons_for(game: &Game, donor: Substance, acceptor: Substance) -> Result<u32, EngineError> {
    match game.policy() {
        TransferPolicy::PerElectron => Ok(1),
        TransferPolicy::Batched => {
            let count = game.population.count();
            let d = game.resources.get(donor)?.available();
            let a = game.resources.get(acceptor)?.available();
            Ok(a.cap(d.cap(count)))
        }
    }
}

/// Move electrons from `donor` to `acceptor`.
///
/// Returns [`TransferOutcome::Rejected`] without touching the game if any
/// gate fails. Errors indicate internal defects only.
pub fn transfer_electron(
    game: &mut Game,
    donor: Substance,
    acceptor: Substance,
) -> Result<TransferOutcome, EngineError> {
    if game.outcome()?.is_terminal() {
        return Ok(reject(donor, acceptor, RejectionReason::GameOver));
    }
    if let Some(reason) = check_gates(game, donor, acceptor)? {
        return Ok(reject(donor, acceptor, reason));
    }

    let electrons = electrons_for(game, donor, acceptor)?;
    if electrons == 0 {
        return Ok(reject(donor, acceptor, RejectionReason::NoTransfers));
    }

    let yield_per_electron = game.resources.get(acceptor)?.atp_per_electron();
    let atp_generated =
        electrons
            .checked_mul(yield_per_electron)
            .ok_or_else(|| EngineError::ArithmeticOverflow {
                context: format!("{electrons} electrons x {yield_per_electron} ATP"),
            })?;

    game.resources.consume(donor, electrons)?;
    game.resources.consume(acceptor, electrons)?;

    let turn = game.turn();
    let reason = format!("{donor}->{acceptor}");
    let mut deaths = 0;
    let mut atp_credited = atp_generated;

    match game.policy() {
        TransferPolicy::Batched => {
            game.population.credit(turn, atp_generated, &reason)?;
        }
        TransferPolicy::PerElectron => {
            // Everyone whose floor(atp / count) share is zero starves now.
            let count = game.population.count();
            if atp_generated < count {
                deaths = game
                    .population
                    .apply_attrition(count.saturating_sub(atp_generated));
            }
            if game.population.is_alive() {
                game.population.credit(turn, atp_generated, &reason)?;
            } else {
                // Only reachable with a zero yield.
                game.population.discard(turn, atp_generated, &reason)?;
                atp_credited = 0;
            }
        }
    }

    let outcome = game.outcome()?;
    debug!(
        %donor,
        %acceptor,
        electrons,
        atp_generated,
        atp_credited,
        deaths,
        ?outcome,
        "electron transfer applied"
    );
    if outcome.is_terminal() {
        info!(?outcome, turn, "game over");
    }

    Ok(TransferOutcome::Applied(TransferReport {
        donor,
        acceptor,
        electrons,
        atp_generated,
        atp_credited,
        deaths,
        outcome,
    }))
}

fn reject(donor: Substance, acceptor: Substance, reason: RejectionReason) -> TransferOutcome {
    debug!(%donor, %acceptor, ?reason, "electron transfer rejected");
    TransferOutcome::Rejected(reason)
}

#[cfg(test)]
mod tests {
    use heterotroph_ledger::PopulationLedger;
    use heterotroph_types::{Quantity, ScenarioId};
    use heterotroph_world::{Resource, scenario_spec};

    use super::*;

    #[allow(clippy::panic)]
    fn game(scenario: ScenarioId, policy: TransferPolicy, count: u32, atp: u32) -> Game {
        let registry = scenario_spec(scenario)
            .and_then(|s| s.build_registry())
            .unwrap_or_else(|e| panic!("registry for {scenario}: {e}"));
        Game::from_parts(scenario, policy, registry, PopulationLedger::new(count, atp))
    }

    fn stock(game: &Game, s: Substance) -> Option<Quantity> {
        game.resources().get(s).ok().map(Resource::available)
    }

    #[test]
    fn batched_moves_min_of_population_and_stock() {
        let mut g = game(ScenarioId::OxygenLimiting, TransferPolicy::Batched, 4, 0);
        let result = g.transfer_electron(Substance::Glucose, Substance::Oxygen).ok();
        assert!(matches!(result, Some(TransferOutcome::Applied(_))), "{result:?}");
        let Some(TransferOutcome::Applied(report)) = result else { return };
        // oxygen has 3, glucose 6, population 4
        assert_eq!(report.electrons, 3);
        assert_eq!(report.atp_generated, 12);
        assert_eq!(g.population().atp(), 12);
        assert_eq!(stock(&g, Substance::Oxygen), Some(Quantity::ZERO));
        assert_eq!(stock(&g, Substance::Glucose), Some(Quantity::Finite(3)));
    }

    #[test]
    fn per_electron_moves_exactly_one() {
        let mut g = game(ScenarioId::OxygenLimiting, TransferPolicy::PerElectron, 4, 0);
        let result = g.transfer_electron(Substance::Glucose, Substance::Oxygen).ok();
        assert!(matches!(
            result,
            Some(TransferOutcome::Applied(TransferReport { electrons: 1, atp_generated: 4, deaths: 0, .. }))
        ));
        assert_eq!(stock(&g, Substance::Oxygen), Some(Quantity::Finite(2)));
        assert_eq!(g.population().atp(), 4);
    }

    #[test]
    fn per_electron_starves_members_with_no_share() {
        // co2 yields 1 ATP; with 3 organisms two get nothing and die.
        let mut g = game(ScenarioId::OxygenLimiting, TransferPolicy::PerElectron, 3, 0);
        let result = g.transfer_electron(Substance::Glucose, Substance::Co2).ok();
        assert!(matches!(
            result,
            Some(TransferOutcome::Applied(TransferReport { deaths: 2, atp_credited: 1, .. }))
        ));
        assert_eq!(g.population().count(), 1);
        assert_eq!(g.population().atp(), 1);
    }

    #[test]
    fn per_electron_always_leaves_a_survivor() {
        let mut g = game(ScenarioId::OxygenLimiting, TransferPolicy::PerElectron, 1_000, 0);
        let result = g.transfer_electron(Substance::Glucose, Substance::Co2).ok();
        assert!(matches!(
            result,
            Some(TransferOutcome::Applied(TransferReport { deaths: 999, atp_credited: 1, .. }))
        ));
        assert!(g.population().is_alive());
        assert_eq!(g.population().count(), 1);
        assert!(g.population().verify_balance().is_balanced());
    }

    #[test]
    fn extinct_population_cannot_transfer() {
        let registry = scenario_spec(ScenarioId::OxygenLimiting)
            .and_then(|s| s.build_registry())
            .ok();
        let Some(registry) = registry else { return };
        let mut g = Game::from_parts(
            ScenarioId::OxygenLimiting,
            TransferPolicy::PerElectron,
            registry,
            PopulationLedger::new(0, 0),
        );
        // a dead population is already game over
        let result = g.transfer_electron(Substance::Glucose, Substance::Oxygen).ok();
        assert_eq!(result, Some(TransferOutcome::Rejected(RejectionReason::GameOver)));
    }

    #[test]
    fn locked_acceptor_is_rejected() {
        let mut g = game(ScenarioId::OxygenLimiting, TransferPolicy::Batched, 1, 0);
        for acceptor in Substance::ANAEROBIC_ACCEPTORS {
            let result = g.transfer_electron(Substance::Glucose, acceptor).ok();
            assert_eq!(
                result,
                Some(TransferOutcome::Rejected(RejectionReason::CapabilityLocked))
            );
            assert_eq!(stock(&g, acceptor), Some(Quantity::Finite(5)));
        }
        assert_eq!(stock(&g, Substance::Glucose), Some(Quantity::Finite(6)));
    }

    #[test]
    fn locked_donor_is_rejected() {
        let mut g = game(ScenarioId::UnlimitedOxygen, TransferPolicy::Batched, 1, 0);
        let result = g.transfer_electron(Substance::Cellulose, Substance::Oxygen).ok();
        assert_eq!(
            result,
            Some(TransferOutcome::Rejected(RejectionReason::CapabilityLocked))
        );
    }

    #[test]
    fn empty_donor_is_out_of_stock() {
        let mut g = game(ScenarioId::UnlimitedOxygen, TransferPolicy::Batched, 1, 0);
        let result = g.transfer_electron(Substance::Lactate, Substance::Oxygen).ok();
        assert_eq!(result, Some(TransferOutcome::Rejected(RejectionReason::OutOfStock)));
    }

    #[test]
    fn co2_only_on_odd_turns() {
        let mut g = game(ScenarioId::OxygenLimiting, TransferPolicy::Batched, 1, 10);
        assert!(
            g.transfer_electron(Substance::Glucose, Substance::Co2)
                .ok()
                .is_some_and(|o| o.is_applied())
        );
        assert!(g.advance_turn().is_ok());
        assert_eq!(g.turn(), 2);
        let result = g.transfer_electron(Substance::Glucose, Substance::Co2).ok();
        assert_eq!(
            result,
            Some(TransferOutcome::Rejected(RejectionReason::WrongTurnParity))
        );
        assert!(g.advance_turn().is_ok());
        assert!(
            g.transfer_electron(Substance::Glucose, Substance::Co2)
                .ok()
                .is_some_and(|o| o.is_applied())
        );
    }

    #[test]
    fn swapped_roles_are_rejected() {
        let mut g = game(ScenarioId::OxygenLimiting, TransferPolicy::Batched, 1, 0);
        assert_eq!(
            g.transfer_electron(Substance::Oxygen, Substance::Oxygen).ok(),
            Some(TransferOutcome::Rejected(RejectionReason::NotADonor))
        );
        assert_eq!(
            g.transfer_electron(Substance::Glucose, Substance::Glucose).ok(),
            Some(TransferOutcome::Rejected(RejectionReason::NotAnAcceptor))
        );
    }

    #[test]
    fn journal_stays_balanced() {
        let mut g = game(ScenarioId::OxygenLimiting, TransferPolicy::PerElectron, 5, 0);
        for _ in 0..4 {
            g.transfer_electron(Substance::Glucose, Substance::Oxygen).ok();
            g.transfer_electron(Substance::Glucose, Substance::Co2).ok();
        }
        assert!(g.population().verify_balance().is_balanced());
    }
}
