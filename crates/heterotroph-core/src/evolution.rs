//! Evolution: trade ATP for a capability.
//!
//! The price is fixed by the rule set ([`TransferPolicy::evolution_cost`]).
//! `growth` may be bought any number of times; the other capabilities are
//! one-time unlocks whose effects reshape the resource registry.
//!
//! [`TransferPolicy::evolution_cost`]: heterotroph_types::TransferPolicy::evolution_cost

use heterotroph_types::{AtpEntryType, Capability, Quantity, RejectionReason, Substance};
use tracing::{debug, info};

use crate::error::EngineError;
use crate::game::Game;

/// Glucose released per unit of cellulose broken down by exo-enzymes.
const GLUCOSE_PER_CELLULOSE: u32 = 3;

/// Stock given to each anaerobic acceptor when anaerobiosis evolves.
const ANAEROBIC_STOCK: u32 = 5;

/// What a successful evolution did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvolutionReport {
    /// Capability bought.
    pub capability: Capability,
    /// ATP spent.
    pub cost: u32,
    /// Population count afterwards.
    pub count: u32,
    /// ATP pool afterwards.
    pub atp: u32,
}

/// Result of an evolve command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolutionOutcome {
    /// The capability was bought and its effect applied.
    Applied(EvolutionReport),
    /// Nothing changed.
    Rejected(RejectionReason),
}

impl EvolutionOutcome {
    /// Whether the evolution changed the game.
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Buy `capability` for the game's population.
pub fn evolve(game: &mut Game, capability: Capability) -> Result<EvolutionOutcome, EngineError> {
    if game.outcome()?.is_terminal() {
        return Ok(reject(capability, RejectionReason::GameOver));
    }
    if !capability.is_repeatable() && game.population.has_capability(capability) {
        return Ok(reject(capability, RejectionReason::AlreadyUnlocked));
    }

    let cost = game.policy().evolution_cost();
    if game.population.atp() < cost {
        return Ok(reject(capability, RejectionReason::InsufficientAtp));
    }

    // Work out the effect before touching anything, so a failure leaves
    // the game exactly as it was.
    let effect = prepare_effect(game, capability)?;

    let turn = game.turn();
    game.population.debit(
        turn,
        AtpEntryType::EvolutionCost,
        cost,
        &format!("evolve:{capability}"),
    )?;
    commit_effect(game, effect)?;
    game.population.unlock(capability);

    let report = EvolutionReport {
        capability,
        cost,
        count: game.population.count(),
        atp: game.population.atp(),
    };
    info!(
        %capability,
        cost,
        count = report.count,
        atp = report.atp,
        "evolution applied"
    );
    Ok(EvolutionOutcome::Applied(report))
}

/// A capability's effect with every derived quantity already computed.
#[derive(Debug, Clone, Copy)]
enum Effect {
    Growth,
    ExoEnzymes { glucose: Quantity },
    Anaerobiosis,
    Fermentation { seed: Quantity },
}

fn prepare_effect(game: &Game, capability: Capability) -> Result<Effect, EngineError> {
    let resources = &game.resources;
    match capability {
        Capability::Growth => {
            game.population
                .count()
                .checked_mul(2)
                .ok_or_else(|| overflow("population doubling"))?;
            Ok(Effect::Growth)
        }
        Capability::ExoEnzymes => {
            let cellulose = resources.get(Substance::Cellulose)?.available();
            let released = scale(cellulose, GLUCOSE_PER_CELLULOSE)?;
            let glucose = resources
                .get(Substance::Glucose)?
                .available()
                .checked_add(released)
                .ok_or_else(|| overflow("glucose after cellulose breakdown"))?;
            Ok(Effect::ExoEnzymes { glucose })
        }
        Capability::Anaerobiosis => Ok(Effect::Anaerobiosis),
        // lactate = glucose, acetate = lactate, hydrogen = acetate
        Capability::Fermentation => Ok(Effect::Fermentation {
            seed: resources.get(Substance::Glucose)?.available(),
        }),
    }
}

fn commit_effect(game: &mut Game, effect: Effect) -> Result<(), EngineError> {
    let resources = &mut game.resources;
    match effect {
        Effect::Growth => {
            game.population.double()?;
        }
        Effect::ExoEnzymes { glucose } => {
            resources.set_usable(Substance::Cellulose, true)?;
            resources.set_available(Substance::Glucose, glucose)?;
            resources.set_available(Substance::Cellulose, Quantity::ZERO)?;
        }
        Effect::Anaerobiosis => {
            resources.unlock_acceptors(&Substance::ANAEROBIC_ACCEPTORS, ANAEROBIC_STOCK)?;
        }
        Effect::Fermentation { seed } => {
            for product in [Substance::Lactate, Substance::Acetate, Substance::Hydrogen] {
                resources.set_available(product, seed)?;
            }
        }
    }
    Ok(())
}

fn scale(quantity: Quantity, factor: u32) -> Result<Quantity, EngineError> {
    match quantity {
        Quantity::Unbounded => Ok(Quantity::Unbounded),
        Quantity::Finite(n) => n
            .checked_mul(factor)
            .map(Quantity::Finite)
            .ok_or_else(|| overflow("cellulose to glucose conversion")),
    }
}

fn overflow(context: &str) -> EngineError {
    EngineError::ArithmeticOverflow {
        context: context.to_owned(),
    }
}

fn reject(capability: Capability, reason: RejectionReason) -> EvolutionOutcome {
    debug!(%capability, ?reason, "evolution rejected");
    EvolutionOutcome::Rejected(reason)
}
