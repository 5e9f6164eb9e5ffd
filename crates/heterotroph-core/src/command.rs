//! Text commands and the session that dispatches them.
//!
//! A display layer (or the headless driver) turns player input into
//! [`Command`] values and hands them to a [`Session`]. The session owns at
//! most one [`Game`]; selecting a scenario replaces it.
//!
//! Accepted lines:
//!
//! ```text
//! start oxygen-limiting
//! transfer glucose oxygen
//! evolve exoEnzymes
//! next
//! status
//! ```

use std::str::FromStr;

use heterotroph_types::{Capability, GameSnapshot, ParseError, ScenarioId, Substance};
use tracing::debug;

use crate::config::RulesConfig;
use crate::error::EngineError;
use crate::evolution::EvolutionOutcome;
use crate::game::{Game, TurnOutcome};
use crate::transfer::TransferOutcome;

/// Errors raised while parsing or dispatching a command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// A name in the command does not exist.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The command is malformed.
    #[error("usage: {0}")]
    Usage(String),

    /// The command needs a game but none has been started.
    #[error("no active game; start a scenario first")]
    NoActiveGame,

    /// The engine failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// One player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Select a scenario, discarding any current game.
    Start(ScenarioId),
    /// Move electrons from a donor to an acceptor.
    Transfer {
        /// Donor to oxidize.
        donor: Substance,
        /// Acceptor to reduce.
        acceptor: Substance,
    },
    /// Buy a capability.
    Evolve(Capability),
    /// End the current turn.
    AdvanceTurn,
    /// Report the current state without changing it.
    Status,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [verb, scenario] if verb.eq_ignore_ascii_case("start") => {
                Ok(Self::Start(scenario.parse()?))
            }
            [verb, donor, acceptor] if verb.eq_ignore_ascii_case("transfer") => {
                Ok(Self::Transfer {
                    donor: donor.parse()?,
                    acceptor: acceptor.parse()?,
                })
            }
            [verb, capability] if verb.eq_ignore_ascii_case("evolve") => {
                Ok(Self::Evolve(capability.parse()?))
            }
            [verb] if verb.eq_ignore_ascii_case("next") || verb.eq_ignore_ascii_case("advance") => {
                Ok(Self::AdvanceTurn)
            }
            [verb] if verb.eq_ignore_ascii_case("status") => Ok(Self::Status),
            _ => Err(CommandError::Usage(format!(
                "unrecognised command {line:?}; expected start <scenario>, \
                 transfer <donor> <acceptor>, evolve <capability>, next, or status"
            ))),
        }
    }
}

/// What a dispatched command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// A new game began.
    Started(GameSnapshot),
    /// Result of a transfer.
    Transfer(TransferOutcome),
    /// Result of an evolution.
    Evolution(EvolutionOutcome),
    /// Result of advancing the turn.
    Turn(TurnOutcome),
    /// Current state.
    Status(GameSnapshot),
}

/// A player's session: the rule set and the current game, if any.
#[derive(Debug, Clone)]
pub struct Session {
    rules: RulesConfig,
    game: Option<Game>,
}

impl Session {
    /// Create a session with no game.
    pub const fn new(rules: RulesConfig) -> Self {
        Self { rules, game: None }
    }

    /// The current game.
    pub const fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// Parse and run one line of input.
    ///
    /// Blank lines and lines starting with `#` yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if the line cannot be parsed or dispatched.
    pub fn execute_line(&mut self, line: &str) -> Result<Option<CommandResult>, CommandError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        let command: Command = trimmed.parse()?;
        self.execute(command).map(Some)
    }

    /// Run one command.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NoActiveGame`] for anything but `Start`
    /// before a game exists, and [`CommandError::Engine`] for invalid
    /// scenarios and internal failures.
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError> {
        debug!(?command, "dispatching command");
        if let Command::Start(scenario) = command {
            let game = Game::start(scenario, &self.rules)?;
            let snapshot = game.snapshot()?;
            self.game = Some(game);
            return Ok(CommandResult::Started(snapshot));
        }

        let game = self.game.as_mut().ok_or(CommandError::NoActiveGame)?;
        let result = match command {
            Command::Transfer { donor, acceptor } => {
                CommandResult::Transfer(game.transfer_electron(donor, acceptor)?)
            }
            Command::Evolve(capability) => CommandResult::Evolution(game.evolve(capability)?),
            Command::AdvanceTurn => CommandResult::Turn(game.advance_turn()?),
            Command::Status | Command::Start(_) => CommandResult::Status(game.snapshot()?),
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use heterotroph_types::{Outcome, RejectionReason, TransferPolicy};

    use super::*;

    #[test]
    fn parses_every_verb() {
        assert_eq!(
            "start oxygen-limiting".parse::<Command>().ok(),
            Some(Command::Start(ScenarioId::OxygenLimiting))
        );
        assert_eq!(
            "transfer glucose oxygen".parse::<Command>().ok(),
            Some(Command::Transfer {
                donor: Substance::Glucose,
                acceptor: Substance::Oxygen,
            })
        );
        assert_eq!(
            "evolve exo_enzymes".parse::<Command>().ok(),
            Some(Command::Evolve(Capability::ExoEnzymes))
        );
        assert_eq!("next".parse::<Command>().ok(), Some(Command::AdvanceTurn));
        assert_eq!("ADVANCE".parse::<Command>().ok(), Some(Command::AdvanceTurn));
        assert_eq!("status".parse::<Command>().ok(), Some(Command::Status));
    }

    #[test]
    fn unknown_names_surface_parse_errors() {
        assert!(matches!(
            "transfer sugar oxygen".parse::<Command>(),
            Err(CommandError::Parse(ParseError::UnknownSubstance(_)))
        ));
        assert!(matches!(
            "evolve flight".parse::<Command>(),
            Err(CommandError::Parse(ParseError::UnknownCapability(_)))
        ));
        assert!(matches!(
            "start mars".parse::<Command>(),
            Err(CommandError::Parse(ParseError::UnknownScenario(_)))
        ));
    }

    #[test]
    fn malformed_lines_are_usage_errors() {
        for line in ["transfer glucose", "jump", "next now"] {
            assert!(
                matches!(line.parse::<Command>(), Err(CommandError::Usage(_))),
                "{line}"
            );
        }
    }

    #[test]
    fn commands_before_start_need_a_game() {
        let mut session = Session::new(RulesConfig::default());
        assert!(matches!(
            session.execute(Command::AdvanceTurn),
            Err(CommandError::NoActiveGame)
        ));
        assert!(session.game().is_none());
    }

    #[test]
    fn start_replaces_the_current_game() {
        let mut session = Session::new(RulesConfig::default());
        assert!(session.execute_line("start oxygen-limiting").is_ok());
        let first = session.game().map(Game::id);
        assert!(session.execute_line("transfer glucose oxygen").is_ok());
        assert!(session.execute_line("start oxygen-limiting").is_ok());
        let second = session.game().map(Game::id);
        assert_ne!(first, second);
        assert_eq!(session.game().map(|g| g.population().atp()), Some(0));
    }

    #[test]
    fn unimplemented_scenario_is_an_engine_error() {
        let mut session = Session::new(RulesConfig::default());
        assert!(matches!(
            session.execute_line("start photoautotroph"),
            Err(CommandError::Engine(EngineError::InvalidScenario(_)))
        ));
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        let mut session = Session::new(RulesConfig::default());
        assert!(matches!(session.execute_line("   "), Ok(None)));
        assert!(matches!(session.execute_line("# comment"), Ok(None)));
    }

    #[test]
    fn dispatch_reports_rejections() {
        let mut session = Session::new(RulesConfig {
            policy: TransferPolicy::Batched,
        });
        assert!(session.execute_line("start oxygen-limiting").is_ok());
        let result = session.execute_line("transfer glucose nitrate").ok().flatten();
        assert_eq!(
            result,
            Some(CommandResult::Transfer(TransferOutcome::Rejected(
                RejectionReason::CapabilityLocked
            )))
        );
        let status = session.execute_line("status").ok().flatten();
        assert!(matches!(
            status,
            Some(CommandResult::Status(GameSnapshot {
                outcome: Outcome::InProgress,
                ..
            }))
        ));
    }
}
