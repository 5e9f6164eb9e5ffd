//! Script execution against a [`Session`].
//!
//! A script is one command per line. The driver starts the configured
//! default scenario first, so a script without `start` plays that scenario.
//! Execution stops at the first error, when the game reaches a terminal
//! outcome, or when the turn limit is passed.

use heterotroph_core::{
    Command, CommandError, CommandResult, EvolutionOutcome, GameConfig, Session,
    TransferOutcome, TurnOutcome,
};
use heterotroph_types::{GameSnapshot, Outcome};
use tracing::{info, warn};

/// Errors that stop a script.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// A line could not be parsed or dispatched.
    #[error("line {line}: {source}")]
    Command {
        /// One-based line number.
        line: usize,
        /// The underlying command error.
        source: CommandError,
    },

    /// The script advanced past the configured turn limit.
    #[error("turn limit of {max_turns} exceeded")]
    TurnLimit {
        /// The configured limit.
        max_turns: u64,
    },
}

/// Why the driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every line ran.
    EndOfScript,
    /// The game was won or lost; remaining lines were skipped.
    GameOver(Outcome),
}

/// Final state after a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines that produced a command.
    pub commands: usize,
    /// Why execution stopped.
    pub stop: StopReason,
    /// Snapshot of the game at the end.
    pub snapshot: GameSnapshot,
}

/// Run `script` in a fresh session built from `config`.
pub fn run_script(config: &GameConfig, script: &str) -> Result<RunSummary, DriverError> {
    let mut session = Session::new(config.rules);
    session
        .execute(Command::Start(config.session.default_scenario))
        .map_err(|source| DriverError::Command { line: 0, source })?;

    let mut commands = 0_usize;
    let mut stop = StopReason::EndOfScript;

    for (index, text) in script.lines().enumerate() {
        let line = index.saturating_add(1);
        let result = session
            .execute_line(text)
            .map_err(|source| DriverError::Command { line, source })?;
        let Some(result) = result else { continue };
        commands = commands.saturating_add(1);
        log_result(line, &result);

        if let Some(game) = session.game() {
            if game.turn() > config.session.max_turns {
                return Err(DriverError::TurnLimit {
                    max_turns: config.session.max_turns,
                });
            }
            let outcome = game
                .outcome()
                .map_err(|e| DriverError::Command {
                    line,
                    source: e.into(),
                })?;
            if outcome.is_terminal() {
                info!(line, ?outcome, "game over, skipping remaining lines");
                stop = StopReason::GameOver(outcome);
                break;
            }
        }
    }

    let snapshot = session
        .execute(Command::Status)
        .map_err(|source| DriverError::Command { line: 0, source })
        .and_then(|result| match result {
            CommandResult::Status(snapshot) | CommandResult::Started(snapshot) => Ok(snapshot),
            _ => Err(DriverError::Command {
                line: 0,
                source: CommandError::NoActiveGame,
            }),
        })?;

    Ok(RunSummary {
        commands,
        stop,
        snapshot,
    })
}

fn log_result(line: usize, result: &CommandResult) {
    match result {
        CommandResult::Started(snapshot) => {
            info!(line, scenario = %snapshot.scenario, game_id = %snapshot.game_id, "started");
        }
        CommandResult::Transfer(TransferOutcome::Applied(report)) => {
            info!(
                line,
                donor = %report.donor,
                acceptor = %report.acceptor,
                electrons = report.electrons,
                atp = report.atp_credited,
                deaths = report.deaths,
                "transfer"
            );
        }
        CommandResult::Evolution(EvolutionOutcome::Applied(report)) => {
            info!(line, capability = %report.capability, cost = report.cost, "evolved");
        }
        CommandResult::Transfer(TransferOutcome::Rejected(reason))
        | CommandResult::Evolution(EvolutionOutcome::Rejected(reason))
        | CommandResult::Turn(TurnOutcome::Rejected(reason)) => {
            warn!(line, ?reason, "command had no effect");
        }
        CommandResult::Turn(TurnOutcome::Advanced { turn, .. }) => {
            info!(line, turn, "next turn");
        }
        CommandResult::Status(snapshot) => {
            info!(
                line,
                turn = snapshot.turn,
                atp = snapshot.population.atp,
                count = snapshot.population.count,
                "status"
            );
        }
    }
}
