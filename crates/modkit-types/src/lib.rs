//! Shared value types for modkit player events.
//!
//! Everything a subscriber can receive is defined here so that mods, the
//! lifecycle driver, and tooling agree on one shape. Types flow to
//! `TypeScript` via `ts-rs` for mod tooling.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for characters, items, and subscriptions
//! - [`enums`] -- Skill and inventory change enumerations
//! - [`structs`] -- Player state snapshots (characters, items, stack changes)
//! - [`args`] -- Event payloads delivered to subscribers

pub mod args;
pub mod enums;
pub mod ids;
pub mod structs;

pub use args::{FarmerChangedArgs, InventoryChangedArgs, LevelUpArgs, LoadedGameArgs};
pub use enums::{ChangeType, SkillType};
pub use ids::{FarmerId, ItemId, SubscriptionId};
pub use structs::{Farmer, Item, ItemStackChange, PlayerSnapshot};
