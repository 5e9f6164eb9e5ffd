//! Enumeration types for the Heterotroph simulation.
//!
//! Substances, capabilities, scenarios, rule policies, outcomes, and the
//! rejection reasons reported when a command is a no-op. Every enum that a
//! caller can name in text implements [`FromStr`] so that the display layer
//! can forward raw user input.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ParseError;

/// Lowercase the input and drop separators so that `exoEnzymes`,
/// `exo_enzymes` and `Exo-Enzymes` compare equal.
fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

// ---------------------------------------------------------------------------
// Substances
// ---------------------------------------------------------------------------

/// Which side of an electron transfer a substance sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ResourceKind {
    /// Oxidized to release electrons.
    Donor,
    /// Reduced by accepting electrons, yielding ATP.
    Acceptor,
}

/// Every named resource in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Substance {
    // --- Donors ---
    /// Simple sugar, the baseline organic donor.
    Glucose,
    /// Plant polymer; needs extracellular enzymes before it can be used.
    Cellulose,
    /// Organic acid produced by fermentation.
    Lactate,
    /// Secondary fermentation byproduct.
    Acetate,
    /// Gaseous fermentation byproduct.
    Hydrogen,

    // --- Acceptors ---
    /// Aerobic respiration.
    Oxygen,
    /// Denitrification.
    Nitrate,
    /// Ferric iron reduction.
    Iron,
    /// Sulfur reduction.
    Sulfur,
    /// Carbon dioxide; only usable on alternating turns.
    Co2,
}

impl Substance {
    /// All substances in registry order.
    pub const ALL: [Self; 10] = [
        Self::Glucose,
        Self::Cellulose,
        Self::Lactate,
        Self::Acetate,
        Self::Hydrogen,
        Self::Oxygen,
        Self::Nitrate,
        Self::Iron,
        Self::Sulfur,
        Self::Co2,
    ];

    /// The anaerobic acceptors opened up by [`Capability::Anaerobiosis`].
    pub const ANAEROBIC_ACCEPTORS: [Self; 3] = [Self::Nitrate, Self::Iron, Self::Sulfur];

    /// Whether this substance is a donor or an acceptor.
    pub const fn kind(self) -> ResourceKind {
        match self {
            Self::Glucose | Self::Cellulose | Self::Lactate | Self::Acetate | Self::Hydrogen => {
                ResourceKind::Donor
            }
            Self::Oxygen | Self::Nitrate | Self::Iron | Self::Sulfur | Self::Co2 => {
                ResourceKind::Acceptor
            }
        }
    }

    /// ATP generated per electron accepted. Zero for donors.
    pub const fn atp_per_electron(self) -> u32 {
        match self {
            Self::Oxygen => 4,
            Self::Nitrate => 3,
            Self::Iron => 2,
            Self::Sulfur | Self::Co2 => 1,
            Self::Glucose | Self::Cellulose | Self::Lactate | Self::Acetate | Self::Hydrogen => 0,
        }
    }

    /// Turn constraint on using this substance in a transfer.
    pub const fn periodicity(self) -> Periodicity {
        match self {
            Self::Co2 => Periodicity::OddTurnsOnly,
            _ => Periodicity::Always,
        }
    }

    /// Canonical lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Glucose => "glucose",
            Self::Cellulose => "cellulose",
            Self::Lactate => "lactate",
            Self::Acetate => "acetate",
            Self::Hydrogen => "hydrogen",
            Self::Oxygen => "oxygen",
            Self::Nitrate => "nitrate",
            Self::Iron => "iron",
            Self::Sulfur => "sulfur",
            Self::Co2 => "co2",
        }
    }
}

impl core::fmt::Display for Substance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Substance {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Self::ALL
            .into_iter()
            .find(|sub| sub.as_str() == key)
            .ok_or_else(|| ParseError::UnknownSubstance(s.to_owned()))
    }
}

/// When a resource may take part in a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Periodicity {
    /// Usable on every turn.
    Always,
    /// Usable only when the turn number is odd.
    OddTurnsOnly,
}

impl Periodicity {
    /// Whether the resource may be used on `turn`.
    pub const fn permits(self, turn: u64) -> bool {
        match self {
            Self::Always => true,
            Self::OddTurnsOnly => turn % 2 == 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// An evolutionary capability bought with ATP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum Capability {
    /// Doubles the population. Repeatable.
    Growth,
    /// Extracellular enzymes that break cellulose down into glucose.
    ExoEnzymes,
    /// Anaerobic respiration on nitrate, iron, and sulfur.
    Anaerobiosis,
    /// Fermentation of glucose into organic acids and gas.
    Fermentation,
}

impl Capability {
    /// All capabilities.
    pub const ALL: [Self; 4] = [
        Self::Growth,
        Self::ExoEnzymes,
        Self::Anaerobiosis,
        Self::Fermentation,
    ];

    /// Repeatable capabilities are never recorded as unlocked.
    pub const fn is_repeatable(self) -> bool {
        matches!(self, Self::Growth)
    }

    /// Canonical name as shown to players.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Growth => "growth",
            Self::ExoEnzymes => "exoEnzymes",
            Self::Anaerobiosis => "anaerobiosis",
            Self::Fermentation => "fermentation",
        }
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Self::ALL
            .into_iter()
            .find(|cap| normalize(cap.as_str()) == key)
            .ok_or_else(|| ParseError::UnknownCapability(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Scenarios and rules
// ---------------------------------------------------------------------------

/// Selectable starting scenarios.
///
/// `OxygenPulse` and `Photoautotroph` are listed so that the display layer
/// can offer them, but they have no rules; starting one fails fast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum ScenarioId {
    /// Oxygen never runs out; alternative acceptors are empty.
    UnlimitedOxygen,
    /// Oxygen is scarce; anaerobic acceptors are seeded.
    OxygenLimiting,
    /// Periodic oxygen supply. No rules yet.
    OxygenPulse,
    /// Light-driven growth. No rules yet.
    Photoautotroph,
}

impl ScenarioId {
    /// All scenario identifiers.
    pub const ALL: [Self; 4] = [
        Self::UnlimitedOxygen,
        Self::OxygenLimiting,
        Self::OxygenPulse,
        Self::Photoautotroph,
    ];

    /// Canonical kebab-case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnlimitedOxygen => "unlimited-oxygen",
            Self::OxygenLimiting => "oxygen-limiting",
            Self::OxygenPulse => "oxygen-pulse",
            Self::Photoautotroph => "photoautotroph",
        }
    }
}

impl core::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Self::ALL
            .into_iter()
            .find(|id| normalize(id.as_str()) == key)
            .ok_or_else(|| ParseError::UnknownScenario(s.to_owned()))
    }
}

/// The rule set governing electron transfer, death, and evolution cost.
///
/// The two policies are not equivalent and must never be mixed within one
/// game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TransferPolicy {
    /// One electron per transfer; starvation is folded into the transfer.
    PerElectron,
    /// As many electrons as the population can move; starvation happens
    /// during per-turn maintenance.
    #[default]
    Batched,
}

impl TransferPolicy {
    /// ATP cost of every evolution under this rule set.
    pub const fn evolution_cost(self) -> u32 {
        match self {
            Self::PerElectron => 6,
            Self::Batched => 3,
        }
    }

    /// Whether the per-turn maintenance step runs under this rule set.
    pub const fn has_maintenance(self) -> bool {
        matches!(self, Self::Batched)
    }
}

/// Terminal state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Outcome {
    /// Donors remain and the population is alive.
    InProgress,
    /// All organic matter has been consumed.
    Win,
    /// The population died out.
    Loss,
}

impl Outcome {
    /// Whether the game has ended.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Why a command left the game unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum RejectionReason {
    /// Donor or acceptor has no stock.
    OutOfStock,
    /// The ATP pool cannot cover the cost.
    InsufficientAtp,
    /// The resource has not been unlocked yet.
    CapabilityLocked,
    /// The acceptor cannot be used on this turn.
    WrongTurnParity,
    /// The computed number of electrons was zero.
    NoTransfers,
    /// A one-time capability is already unlocked.
    AlreadyUnlocked,
    /// The named donor is an acceptor.
    NotADonor,
    /// The named acceptor is a donor.
    NotAnAcceptor,
    /// The game has already been won or lost.
    GameOver,
}

// ---------------------------------------------------------------------------
// ATP journal
// ---------------------------------------------------------------------------

/// Category of an ATP journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum AtpEntryType {
    /// Credit: ATP generated by electron transfer.
    TransferYield,
    /// Debit: per-turn upkeep.
    Maintenance,
    /// Debit: cost of an evolution.
    EvolutionCost,
    /// Generated but never credited because the population died.
    Discarded,
}

impl AtpEntryType {
    /// Credits add to the pool.
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::TransferYield)
    }

    /// Debits remove from the pool.
    pub const fn is_debit(self) -> bool {
        matches!(self, Self::Maintenance | Self::EvolutionCost)
    }
}
