//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Player characters, inventory items, and subscriptions each get their own
//! newtype so identifiers cannot be mixed up at compile time. All IDs use
//! UUID v7 (time-ordered).

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a player character.
    FarmerId
}

define_id! {
    /// Unique identifier for an item instance held in an inventory.
    ///
    /// Two stacks of the same item kind are distinct items with distinct ids.
    ItemId
}

define_id! {
    /// Unique identifier for a subscriber registration on an event channel.
    SubscriptionId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = ItemId::new();
        let b = ItemId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn uuid_conversion_is_lossless() {
        let raw = Uuid::now_v7();
        let id = FarmerId::from(raw);
        assert_eq!(Uuid::from(id), raw);
        assert_eq!(id.into_inner(), raw);
        assert_eq!(id.to_string(), raw.to_string());
    }

    #[test]
    fn serializes_as_bare_uuid() {
        let raw = Uuid::now_v7();
        let json = serde_json::to_string(&SubscriptionId(raw)).ok();
        assert_eq!(json, Some(format!("\"{raw}\"")));
    }
}
