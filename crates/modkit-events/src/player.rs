//! Events raised when the player data changes.
//!
//! [`PlayerEvents`] owns one [`EventChannel`] per player event. Mods register
//! on the public channels; the lifecycle driver calls the `invoke_*` methods
//! when it detects the corresponding change. The registry is an explicit
//! object: build it with [`PlayerEvents::new`] at startup and tear it down
//! with [`PlayerEvents::clear`].

use modkit_types::{
    Farmer, FarmerChangedArgs, InventoryChangedArgs, Item, ItemStackChange, LevelUpArgs,
    LoadedGameArgs, SkillType,
};
use tracing::debug;

use crate::channel::EventChannel;
use crate::dispatch::DispatchReport;
use crate::monitor::Monitor;

/// Channel name of [`PlayerEvents::loaded_game`].
pub const LOADED_GAME: &str = "PlayerEvents.LoadedGame";
/// Channel name of [`PlayerEvents::farmer_changed`].
pub const FARMER_CHANGED: &str = "PlayerEvents.FarmerChanged";
/// Channel name of [`PlayerEvents::inventory_changed`].
pub const INVENTORY_CHANGED: &str = "PlayerEvents.InventoryChanged";
/// Channel name of [`PlayerEvents::leveled_up`].
pub const LEVELED_UP: &str = "PlayerEvents.LeveledUp";

/// Registry of player event channels.
#[derive(Debug)]
pub struct PlayerEvents {
    /// Raised after the player loads a saved game.
    pub loaded_game: EventChannel<LoadedGameArgs>,

    /// Raised after the host assigns a new player character. On load this
    /// fires just before [`loaded_game`](Self::loaded_game).
    pub farmer_changed: EventChannel<FarmerChangedArgs>,

    /// Raised after the player's inventory changes in any way (item added or
    /// removed, stack size changed, slots sorted).
    pub inventory_changed: EventChannel<InventoryChangedArgs>,

    /// Raised as soon as a player skill levels up, not when the host
    /// announces it to the player.
    pub leveled_up: EventChannel<LevelUpArgs>,
}

impl PlayerEvents {
    /// Create a registry with no subscribers.
    pub const fn new() -> Self {
        Self {
            loaded_game: EventChannel::new(LOADED_GAME),
            farmer_changed: EventChannel::new(FARMER_CHANGED),
            inventory_changed: EventChannel::new(INVENTORY_CHANGED),
            leveled_up: EventChannel::new(LEVELED_UP),
        }
    }

    /// Raise a `LoadedGame` event.
    pub fn invoke_loaded_game(&self, monitor: &dyn Monitor, args: LoadedGameArgs) -> DispatchReport {
        self.loaded_game.publish(monitor, None, &args)
    }

    /// Raise a `FarmerChanged` event.
    pub fn invoke_farmer_changed(
        &self,
        monitor: &dyn Monitor,
        prior_farmer: Option<Farmer>,
        new_farmer: Farmer,
    ) -> DispatchReport {
        let args = FarmerChangedArgs {
            prior_farmer,
            new_farmer,
        };
        self.farmer_changed.publish(monitor, None, &args)
    }

    /// Raise an `InventoryChanged` event.
    pub fn invoke_inventory_changed(
        &self,
        monitor: &dyn Monitor,
        inventory: Vec<Item>,
        changed_items: impl IntoIterator<Item = ItemStackChange>,
    ) -> DispatchReport {
        let args = InventoryChangedArgs {
            inventory,
            changed_items: changed_items.into_iter().collect(),
        };
        self.inventory_changed.publish(monitor, None, &args)
    }

    /// Raise a `LeveledUp` event.
    pub fn invoke_leveled_up(
        &self,
        monitor: &dyn Monitor,
        skill: SkillType,
        new_level: u32,
    ) -> DispatchReport {
        self.leveled_up
            .publish(monitor, None, &LevelUpArgs { skill, new_level })
    }

    /// Total registrations across all channels.
    pub fn subscriber_count(&self) -> usize {
        [
            self.loaded_game.subscriber_count(),
            self.farmer_changed.subscriber_count(),
            self.inventory_changed.subscriber_count(),
            self.leveled_up.subscriber_count(),
        ]
        .into_iter()
        .fold(0_usize, usize::saturating_add)
    }

    /// Remove every subscriber from every channel.
    pub fn clear(&self) {
        self.loaded_game.clear();
        self.farmer_changed.clear();
        self.inventory_changed.clear();
        self.leveled_up.clear();
        debug!("Player event channels cleared");
    }
}

impl Default for PlayerEvents {
    fn default() -> Self {
        Self::new()
    }
}
