//! Error types for the `heterotroph-core` crate.
//!
//! Rule violations during play are reported as [`RejectionReason`] values
//! inside outcome reports, never as errors. [`EngineError`] is reserved for
//! structurally invalid input and internal defects.
//!
//! [`RejectionReason`]: heterotroph_types::RejectionReason

use heterotroph_ledger::LedgerError;
use heterotroph_types::ScenarioId;
use heterotroph_world::WorldError;

/// Errors surfaced by engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The scenario has no rules behind it.
    #[error("invalid scenario: {0}")]
    InvalidScenario(ScenarioId),

    /// A resource registry operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A population ledger operation failed.
    #[error("ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },

    /// Arithmetic overflow in an engine calculation.
    #[error("arithmetic overflow in engine calculation: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}
