//! Shared type definitions for the Heterotroph simulation.
//!
//! This crate is the single source of truth for the vocabulary shared by the
//! engine crates and the display layer. Types flow to `TypeScript` via
//! `ts-rs` so that a front end can render [`GameSnapshot`] directly.
//!
//! # Modules
//!
//! - [`enums`] -- Substances, capabilities, scenarios, policies, outcomes
//! - [`error`] -- [`ParseError`] for names that do not exist
//! - [`ids`] -- Type-safe UUID wrappers
//! - [`structs`] -- [`Quantity`], the ATP journal entry, display projections

pub mod enums;
pub mod error;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    AtpEntryType, Capability, Outcome, Periodicity, RejectionReason, ResourceKind, ScenarioId,
    Substance, TransferPolicy,
};
pub use error::ParseError;
pub use ids::{AtpEntryId, GameId};
pub use structs::{AtpEntry, GameSnapshot, PopulationStatus, Quantity};
