//! Built-in subscribers that log every player event.

use modkit_events::{PlayerEvents, Subscriber};
use modkit_types::{FarmerChangedArgs, InventoryChangedArgs, LevelUpArgs, LoadedGameArgs};
use tracing::info;

/// Owner label of the built-in subscribers.
pub const OWNER: &str = "modkit.log";

/// Register one logging subscriber on each player channel.
pub fn register_logging(events: &PlayerEvents) {
    events
        .loaded_game
        .subscribe(&Subscriber::new(OWNER, |_, args: &LoadedGameArgs| {
            info!(loaded = args.loaded, "LoadedGame");
            Ok(())
        }));

    events
        .farmer_changed
        .subscribe(&Subscriber::new(OWNER, |_, args: &FarmerChangedArgs| {
            info!(
                prior = args.prior_farmer.as_ref().map(|f| f.name.as_str()),
                new = args.new_farmer.name.as_str(),
                "FarmerChanged"
            );
            Ok(())
        }));

    events
        .inventory_changed
        .subscribe(&Subscriber::new(OWNER, |_, args: &InventoryChangedArgs| {
            info!(
                slots = args.inventory.len(),
                added = args.added().count(),
                removed = args.removed().count(),
                quantity_changed = args.quantity_changed().count(),
                "InventoryChanged"
            );
            Ok(())
        }));

    events
        .leveled_up
        .subscribe(&Subscriber::new(OWNER, |_, args: &LevelUpArgs| {
            info!(skill = args.skill.as_str(), new_level = args.new_level, "LeveledUp");
            Ok(())
        }));
}
