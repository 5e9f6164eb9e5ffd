//! Resources and scenarios for the Heterotroph simulation.
//!
//! This crate models the environment the population lives in: the donors
//! and acceptors, how much of each is left, which ones are usable, and the
//! starting table for every scenario.
//!
//! # Modules
//!
//! - [`error`] -- Error types for registry operations.
//! - [`registry`] -- [`ResourceRegistry`] and its [`Resource`] entries.
//! - [`scenario`] -- Static starting table keyed by [`ScenarioId`].
//!
//! [`ScenarioId`]: heterotroph_types::ScenarioId

pub mod error;
pub mod registry;
pub mod scenario;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use registry::{Resource, ResourceRegistry};
pub use scenario::{ScenarioSpec, scenario_spec};
