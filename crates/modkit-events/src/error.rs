//! Error types for the modkit-events crate.
//!
//! The only failure this crate knows about is a subscriber failing while it
//! is being notified. Faults are recovered by the dispatcher and handed to a
//! [`Monitor`](crate::monitor::Monitor); they never reach the publisher's
//! caller.

use modkit_types::SubscriptionId;

/// A subscriber failed while handling an event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscriberFault {
    /// The handler returned an error.
    #[error("subscriber `{owner}` failed handling the {event} event: {message}")]
    Failed {
        /// Name of the event being raised.
        event: String,
        /// Owner label of the failing subscriber.
        owner: String,
        /// Registration that failed.
        subscription_id: SubscriptionId,
        /// Rendered error chain.
        message: String,
    },

    /// The handler panicked.
    #[error("subscriber `{owner}` panicked handling the {event} event: {message}")]
    Panicked {
        /// Name of the event being raised.
        event: String,
        /// Owner label of the failing subscriber.
        owner: String,
        /// Registration that failed.
        subscription_id: SubscriptionId,
        /// Panic payload, if it was a string.
        message: String,
    },
}

impl SubscriberFault {
    /// Name of the event that was being raised.
    pub fn event(&self) -> &str {
        match self {
            Self::Failed { event, .. } | Self::Panicked { event, .. } => event,
        }
    }

    /// Owner label of the failing subscriber.
    pub fn owner(&self) -> &str {
        match self {
            Self::Failed { owner, .. } | Self::Panicked { owner, .. } => owner,
        }
    }

    /// Registration that failed.
    pub const fn subscription_id(&self) -> SubscriptionId {
        match self {
            Self::Failed {
                subscription_id, ..
            }
            | Self::Panicked {
                subscription_id, ..
            } => *subscription_id,
        }
    }

    /// Failure description without event or owner.
    pub fn message(&self) -> &str {
        match self {
            Self::Failed { message, .. } | Self::Panicked { message, .. } => message,
        }
    }

    /// Whether the handler panicked rather than returning an error.
    pub const fn is_panic(&self) -> bool {
        matches!(self, Self::Panicked { .. })
    }
}
