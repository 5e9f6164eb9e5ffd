//! Error types for the `heterotroph-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type. The engine guards every call so that in-game
//! rule violations never reach the player as errors.

use heterotroph_types::{Quantity, ScenarioId, Substance};

/// Errors that can occur during resource registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// Requested consumption exceeds the available stock.
    #[error("out of stock: wanted {requested} of {substance} but only {available} available")]
    OutOfStock {
        /// The resource being consumed.
        substance: Substance,
        /// Units requested.
        requested: u32,
        /// Units available.
        available: Quantity,
    },

    /// A registry was built without an entry for this substance.
    #[error("resource missing from registry: {0}")]
    MissingResource(Substance),

    /// A registry was built with two entries for this substance.
    #[error("duplicate resource in registry: {0}")]
    DuplicateResource(Substance),

    /// An acceptor-only operation was applied to a donor.
    #[error("{0} is not an electron acceptor")]
    NotAnAcceptor(Substance),

    /// Attempted to lock a resource that has already been unlocked.
    #[error("{0} is already usable and cannot be locked again")]
    UsableRevoked(Substance),

    /// The scenario is a recognised name without any rules behind it.
    #[error("scenario {0} is not implemented")]
    ScenarioUnimplemented(ScenarioId),

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in resource calculation")]
    ArithmeticOverflow,
}
