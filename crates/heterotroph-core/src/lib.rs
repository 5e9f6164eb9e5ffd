//! Turn engine and session dispatch for the Heterotroph simulation.
//!
//! A player keeps a heterotrophic community alive by routing electrons from
//! donors (glucose and its relatives) to acceptors (oxygen and the anaerobic
//! alternatives), spending the resulting ATP on upkeep and evolution. The
//! game is won when every donor is used up and lost when the population
//! dies out.
//!
//! # Modules
//!
//! - [`command`] -- [`Command`] parsing and the [`Session`] dispatcher.
//! - [`config`] -- Configuration loading from `heterotroph-config.yaml`.
//! - [`error`] -- [`EngineError`] for structural failures.
//! - [`evolution`] -- Capability purchases and their effects.
//! - [`game`] -- The [`Game`] facade owning one session's state.
//! - [`maintenance`] -- Per-turn upkeep under batched rules.
//! - [`outcome`] -- Win/loss evaluation.
//! - [`transfer`] -- Electron transfer under both rule sets.

pub mod command;
pub mod config;
pub mod error;
pub mod evolution;
pub mod game;
pub mod maintenance;
pub mod outcome;
pub mod transfer;

pub use command::{Command, CommandError, CommandResult, Session};
pub use config::{ConfigError, GameConfig, RulesConfig, SessionConfig};
pub use error::EngineError;
pub use evolution::{EvolutionOutcome, EvolutionReport};
pub use game::{Game, TurnOutcome};
pub use maintenance::MaintenanceReport;
pub use outcome::evaluate_outcome;
pub use transfer::{TransferOutcome, TransferReport};
