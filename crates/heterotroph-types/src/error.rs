//! Errors raised when text from the display layer names something that does
//! not exist.

/// A name could not be parsed into one of the closed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// No substance has this name.
    #[error("unknown substance: {0:?}")]
    UnknownSubstance(String),

    /// No capability has this tag.
    #[error("unknown capability: {0:?}")]
    UnknownCapability(String),

    /// No scenario has this identifier.
    #[error("unknown scenario: {0:?}")]
    UnknownScenario(String),
}
