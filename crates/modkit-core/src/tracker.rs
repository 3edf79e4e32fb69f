//! Lifecycle driver for player events.
//!
//! The host hands [`PlayerTracker::observe`] one [`PlayerSnapshot`] per
//! tick while a save is loaded. The tracker compares it with the previous
//! snapshot and raises the matching [`PlayerEvents`]:
//!
//! 1. First snapshot after construction or [`reset`](PlayerTracker::reset):
//!    `FarmerChanged` (no prior character), then `LoadedGame`. This snapshot
//!    becomes the baseline; no inventory or level events are raised for it.
//! 2. Character swapped: `FarmerChanged` with the prior character, and the
//!    new snapshot becomes the baseline.
//! 3. Otherwise: `InventoryChanged` if any item changed, then one
//!    `LeveledUp` per skill whose level went up, in [`SkillType::ALL`] order.

use modkit_events::{DispatchReport, Monitor, PlayerEvents};
use modkit_types::{LoadedGameArgs, PlayerSnapshot, SkillType};
use tracing::{debug, info};

use crate::inventory::diff_inventory;

/// What one call to [`PlayerTracker::observe`] raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerUpdate {
    /// `LoadedGame` was raised.
    pub loaded: bool,
    /// `FarmerChanged` was raised.
    pub farmer_changed: bool,
    /// Number of item changes carried by `InventoryChanged` (0 if not raised).
    pub inventory_changes: usize,
    /// `LeveledUp` events raised, in order.
    pub level_ups: Vec<(SkillType, u32)>,
    /// Combined dispatch counters for every event raised.
    pub dispatch: DispatchReport,
}

impl TrackerUpdate {
    /// Whether any event was raised.
    pub const fn raised_any(&self) -> bool {
        self.loaded || self.farmer_changed || self.inventory_changes > 0 || !self.level_ups.is_empty()
    }
}

/// Detects player state changes between ticks and raises player events.
#[derive(Debug, Default)]
pub struct PlayerTracker {
    last: Option<PlayerSnapshot>,
}

impl PlayerTracker {
    /// Create a tracker with no save loaded.
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Whether a save is currently loaded.
    pub const fn is_loaded(&self) -> bool {
        self.last.is_some()
    }

    /// Forget the loaded save (the player returned to the title screen).
    pub fn reset(&mut self) {
        if self.last.take().is_some() {
            info!("Save unloaded, player tracking reset");
        }
    }

    /// Compare `snapshot` with the previous tick and raise events.
    pub fn observe(
        &mut self,
        snapshot: &PlayerSnapshot,
        events: &PlayerEvents,
        monitor: &dyn Monitor,
    ) -> TrackerUpdate {
        let mut update = TrackerUpdate::default();

        let Some(previous) = self.last.as_ref() else {
            info!(
                farmer = snapshot.farmer.name.as_str(),
                farmer_id = %snapshot.farmer.id,
                "Save loaded"
            );
            update.dispatch.merge(events.invoke_farmer_changed(
                monitor,
                None,
                snapshot.farmer.clone(),
            ));
            update.farmer_changed = true;
            update
                .dispatch
                .merge(events.invoke_loaded_game(monitor, LoadedGameArgs::new(true)));
            update.loaded = true;
            self.last = Some(snapshot.clone());
            return update;
        };

        if previous.farmer.id != snapshot.farmer.id {
            info!(
                prior = previous.farmer.name.as_str(),
                new = snapshot.farmer.name.as_str(),
                "Player character changed"
            );
            update.dispatch.merge(events.invoke_farmer_changed(
                monitor,
                Some(previous.farmer.clone()),
                snapshot.farmer.clone(),
            ));
            update.farmer_changed = true;
            self.last = Some(snapshot.clone());
            return update;
        }

        let changes = diff_inventory(&previous.inventory, &snapshot.inventory);
        if !changes.is_empty() {
            debug!(changes = changes.len(), "Inventory changed");
            update.inventory_changes = changes.len();
            update.dispatch.merge(events.invoke_inventory_changed(
                monitor,
                snapshot.inventory.clone(),
                changes,
            ));
        }

        for skill in SkillType::ALL {
            let before = previous.skill_level(skill);
            let now = snapshot.skill_level(skill);
            if now > before {
                debug!(skill = skill.as_str(), before, now, "Skill leveled up");
                update.level_ups.push((skill, now));
                update
                    .dispatch
                    .merge(events.invoke_leveled_up(monitor, skill, now));
            }
        }

        self.last = Some(snapshot.clone());
        update
    }
}
