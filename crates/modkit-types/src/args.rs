//! Payloads delivered to player event subscribers.
//!
//! Each payload is built once per publish and shared by reference with every
//! subscriber of that publish.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ChangeType, SkillType};
use crate::structs::{Farmer, Item, ItemStackChange};

/// Payload for the `LoadedGame` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LoadedGameArgs {
    /// Whether the save has been loaded. Always `true` when raised.
    pub loaded: bool,
}

impl LoadedGameArgs {
    /// Create the payload.
    pub const fn new(loaded: bool) -> Self {
        Self { loaded }
    }
}

/// Payload for the `FarmerChanged` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FarmerChangedArgs {
    /// The previous player character, if one was active.
    pub prior_farmer: Option<Farmer>,
    /// The new player character.
    pub new_farmer: Farmer,
}

/// Payload for the `InventoryChanged` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InventoryChangedArgs {
    /// The player's inventory after the change.
    pub inventory: Vec<Item>,
    /// Every item that changed.
    pub changed_items: Vec<ItemStackChange>,
}

impl InventoryChangedArgs {
    /// Items added to the inventory.
    pub fn added(&self) -> impl Iterator<Item = &ItemStackChange> {
        self.of_type(ChangeType::Added)
    }

    /// Items removed from the inventory.
    pub fn removed(&self) -> impl Iterator<Item = &ItemStackChange> {
        self.of_type(ChangeType::Removed)
    }

    /// Items whose stack size changed.
    pub fn quantity_changed(&self) -> impl Iterator<Item = &ItemStackChange> {
        self.of_type(ChangeType::StackChange)
    }

    fn of_type(&self, change_type: ChangeType) -> impl Iterator<Item = &ItemStackChange> {
        self.changed_items
            .iter()
            .filter(move |c| c.change_type == change_type)
    }
}

/// Payload for the `LeveledUp` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LevelUpArgs {
    /// The skill that leveled up.
    pub skill: SkillType,
    /// The new level.
    pub new_level: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_views_partition_changes() {
        let kept = Item::new("Hoe", 1);
        let args = InventoryChangedArgs {
            inventory: vec![kept.clone()],
            changed_items: vec![
                ItemStackChange::added(Item::new("Parsnip Seeds", 15)),
                ItemStackChange::removed(Item::new("Sap", 2)),
                ItemStackChange::stack_changed(kept, 2),
                ItemStackChange::added(Item::new("Fiber", 4)),
            ],
        };

        let added: Vec<&str> = args.added().map(|c| c.item.name.as_str()).collect();
        assert_eq!(added, vec!["Parsnip Seeds", "Fiber"]);
        assert_eq!(args.removed().count(), 1);
        assert_eq!(args.quantity_changed().map(|c| c.stack_change).sum::<i64>(), -1);
    }

    #[test]
    fn level_up_serializes_skill_name() {
        let args = LevelUpArgs {
            skill: SkillType::Farming,
            new_level: 5,
        };
        let json = serde_json::to_value(args).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({ "skill": "farming", "new_level": 5 }))
        );
    }
}
