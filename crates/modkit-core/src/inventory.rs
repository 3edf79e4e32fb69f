//! Inventory change detection.
//!
//! Items are matched by [`ItemId`], so a stack that grows or shrinks is a
//! `StackChange` rather than a removal plus an addition. Slot order does not
//! matter: moving an item between slots is not a change.

use std::collections::BTreeMap;

use modkit_types::{Item, ItemId, ItemStackChange};

/// Compute the changes between two inventory observations.
///
/// Added and stack-changed items are listed in `current` order, followed
/// by removed items in `previous` order.
pub fn diff_inventory(previous: &[Item], current: &[Item]) -> Vec<ItemStackChange> {
    let before: BTreeMap<ItemId, &Item> = previous.iter().map(|item| (item.id, item)).collect();
    let after: BTreeMap<ItemId, &Item> = current.iter().map(|item| (item.id, item)).collect();

    let mut changes = Vec::new();

    for item in current {
        match before.get(&item.id) {
            None => changes.push(ItemStackChange::added(item.clone())),
            Some(old) if old.stack != item.stack => {
                changes.push(ItemStackChange::stack_changed(item.clone(), old.stack));
            }
            Some(_) => {}
        }
    }

    changes.extend(
        previous
            .iter()
            .filter(|item| !after.contains_key(&item.id))
            .map(|item| ItemStackChange::removed(item.clone())),
    );

    changes
}
