//! Core value types and read-only projections for the Heterotroph simulation.
//!
//! [`Quantity`] models resource stock including the unbounded sentinel.
//! [`AtpEntry`] is one line of the ATP journal. [`PopulationStatus`] and
//! [`GameSnapshot`] are the projections a display layer renders.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{AtpEntryType, Capability, Outcome, ScenarioId, Substance, TransferPolicy};
use crate::ids::{AtpEntryId, GameId};

// ---------------------------------------------------------------------------
// Quantity
// ---------------------------------------------------------------------------

/// Stock of a resource: a finite count or an inexhaustible supply.
///
/// Finite stock is unsigned, so it can never go negative. Ordering places
/// every finite amount below [`Quantity::Unbounded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Quantity {
    /// A countable number of units.
    Finite(u32),
    /// Never runs out.
    Unbounded,
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Quantity {
    /// No stock.
    pub const ZERO: Self = Self::Finite(0);

    /// Whether there is nothing left.
    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Finite(0))
    }

    /// The finite amount, or `None` when unbounded.
    pub const fn finite(self) -> Option<u32> {
        match self {
            Self::Finite(n) => Some(n),
            Self::Unbounded => None,
        }
    }

    /// The smaller of this stock and `limit`.
    pub fn cap(self, limit: u32) -> u32 {
        match self {
            Self::Finite(n) => n.min(limit),
            Self::Unbounded => limit,
        }
    }

    /// Remove `amount` units. Unbounded stock stays unbounded.
    ///
    /// Returns `None` if the stock is smaller than `amount`.
    pub fn checked_sub(self, amount: u32) -> Option<Self> {
        match self {
            Self::Finite(n) => n.checked_sub(amount).map(Self::Finite),
            Self::Unbounded => Some(Self::Unbounded),
        }
    }

    /// Sum two quantities. Anything plus unbounded is unbounded.
    ///
    /// Returns `None` on overflow of the finite sum.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => a.checked_add(b).map(Self::Finite),
            _ => Some(Self::Unbounded),
        }
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Finite(n) => write!(f, "{n}"),
            Self::Unbounded => f.write_str("unbounded"),
        }
    }
}

// ---------------------------------------------------------------------------
// ATP journal entry
// ---------------------------------------------------------------------------

/// One append-only record of ATP entering, leaving, or being discarded from
/// the population's pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AtpEntry {
    /// Unique entry identifier.
    pub id: AtpEntryId,
    /// The turn when the entry was recorded.
    pub turn: u64,
    /// Credit, debit, or discard.
    pub entry_type: AtpEntryType,
    /// Units of ATP (always positive).
    pub quantity: u32,
    /// Short description, e.g. `"glucose->oxygen"` or `"evolve:growth"`.
    pub reason: String,
    /// Real-world timestamp.
    pub recorded_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

/// Read-only view of the population for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PopulationStatus {
    /// Shared ATP pool.
    pub atp: u32,
    /// Number of living organisms.
    pub count: u32,
    /// `count > 0`.
    pub alive: bool,
    /// One-time capabilities unlocked so far.
    pub unlocked: BTreeSet<Capability>,
}

/// Everything a display layer needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameSnapshot {
    /// Session identifier.
    pub game_id: GameId,
    /// Scenario the game was started from.
    pub scenario: ScenarioId,
    /// Active rule set.
    pub policy: TransferPolicy,
    /// Current turn (starts at 1).
    pub turn: u64,
    /// Donor name to available stock.
    pub donors: BTreeMap<Substance, Quantity>,
    /// Acceptor name to available stock.
    pub acceptors: BTreeMap<Substance, Quantity>,
    /// Population status.
    pub population: PopulationStatus,
    /// Current outcome.
    pub outcome: Outcome,
}
