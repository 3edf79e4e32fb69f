//! Player state value types.
//!
//! These are immutable snapshots copied out of the host game. They carry no
//! behaviour beyond construction helpers and are safe to hand to any number
//! of subscribers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ChangeType, SkillType};
use crate::ids::{FarmerId, ItemId};

/// A player character as seen by mods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Farmer {
    /// Stable identity of the character.
    pub id: FarmerId,
    /// Display name.
    pub name: String,
}

impl Farmer {
    /// Create a character with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: FarmerId::new(),
            name: name.into(),
        }
    }
}

/// A single item stack in an inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Item {
    /// Identity of this stack. Survives stack size changes.
    pub id: ItemId,
    /// Display name of the item kind.
    pub name: String,
    /// Number of units in the stack.
    pub stack: u32,
}

impl Item {
    /// Create an item stack with a fresh id.
    pub fn new(name: impl Into<String>, stack: u32) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            stack,
        }
    }

    /// Return a copy of this item with a different stack size.
    #[must_use]
    pub fn with_stack(&self, stack: u32) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            stack,
        }
    }
}

/// A change to one item between two inventory observations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ItemStackChange {
    /// The item as it is now (or as it was, for removals).
    pub item: Item,
    /// What kind of change happened.
    pub change_type: ChangeType,
    /// Signed change in stack size: the full stack for additions, minus the
    /// full stack for removals, `new - old` otherwise.
    #[ts(type = "number")]
    pub stack_change: i64,
}

impl ItemStackChange {
    /// An item that appeared in the inventory.
    pub fn added(item: Item) -> Self {
        let stack_change = i64::from(item.stack);
        Self {
            item,
            change_type: ChangeType::Added,
            stack_change,
        }
    }

    /// An item that left the inventory.
    pub fn removed(item: Item) -> Self {
        let stack_change = 0_i64.saturating_sub(i64::from(item.stack));
        Self {
            item,
            change_type: ChangeType::Removed,
            stack_change,
        }
    }

    /// An item whose stack went from `previous_stack` to `item.stack`.
    pub fn stack_changed(item: Item, previous_stack: u32) -> Self {
        let stack_change = i64::from(item.stack).saturating_sub(i64::from(previous_stack));
        Self {
            item,
            change_type: ChangeType::StackChange,
            stack_change,
        }
    }
}

/// Everything the lifecycle driver needs to know about the player for one
/// tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerSnapshot {
    /// The active character.
    pub farmer: Farmer,
    /// Inventory contents in slot order.
    #[serde(default)]
    pub inventory: Vec<Item>,
    /// Current level per skill. Missing skills are level 0.
    #[serde(default)]
    pub skills: BTreeMap<SkillType, u32>,
}

impl PlayerSnapshot {
    /// Snapshot with an empty inventory and no skill levels.
    pub const fn new(farmer: Farmer) -> Self {
        Self {
            farmer,
            inventory: Vec::new(),
            skills: BTreeMap::new(),
        }
    }

    /// Current level for a skill, 0 when absent.
    pub fn skill_level(&self, skill: SkillType) -> u32 {
        self.skills.get(&skill).copied().unwrap_or(0)
    }
}
