//! Enumeration types shared by player event payloads.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// A player skill that can level up.
///
/// Declaration order is the order in which simultaneous level-ups are
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    /// Growing crops and raising animals.
    Farming,
    /// Catching fish.
    Fishing,
    /// Gathering wild produce and chopping trees.
    Foraging,
    /// Breaking rocks and collecting ore.
    Mining,
    /// Fighting monsters.
    Combat,
    /// Chance-based bonuses.
    Luck,
}

impl SkillType {
    /// Every skill, in reporting order.
    pub const ALL: [Self; 6] = [
        Self::Farming,
        Self::Fishing,
        Self::Foraging,
        Self::Mining,
        Self::Combat,
        Self::Luck,
    ];

    /// Canonical lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Farming => "farming",
            Self::Fishing => "fishing",
            Self::Foraging => "foraging",
            Self::Mining => "mining",
            Self::Combat => "combat",
            Self::Luck => "luck",
        }
    }
}

impl core::fmt::Display for SkillType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Inventory changes
// ---------------------------------------------------------------------------

/// How an inventory item changed between two observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    /// The item was removed from the inventory.
    Removed,
    /// The item was added to the inventory.
    Added,
    /// The item stayed but its stack size changed.
    StackChange,
}
