//! Subscriber handles and channel registrations.
//!
//! A [`Subscriber`] is a cheaply clonable callable handle tagged with an
//! owner label. Channels never own subscriber state, only clones of the
//! handle. Handle identity (not closure equality) decides which registration
//! `unsubscribe` removes.

use std::sync::Arc;

use modkit_types::SubscriptionId;

/// Signature every event handler implements.
///
/// Handlers receive the sender (`None` when the host raised the event) and a
/// shared reference to the payload. Returning `Err` marks the handler as
/// faulted for this publish.
pub type HandlerFn<A> = dyn Fn(Option<&str>, &A) -> anyhow::Result<()> + Send + Sync;

/// A callable event handler with an owner label.
pub struct Subscriber<A> {
    owner: Arc<str>,
    handler: Arc<HandlerFn<A>>,
}

impl<A> Subscriber<A> {
    /// Wrap a closure as a subscriber owned by `owner` (typically a mod name).
    pub fn new<F>(owner: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Option<&str>, &A) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            owner: Arc::from(owner.into()),
            handler: Arc::new(handler),
        }
    }

    /// Owner label used when reporting faults.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Whether `other` wraps the very same handler.
    pub fn same_handler(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }

    /// Invoke the handler.
    pub fn call(&self, sender: Option<&str>, args: &A) -> anyhow::Result<()> {
        (self.handler)(sender, args)
    }
}

impl<A> Clone for Subscriber<A> {
    fn clone(&self) -> Self {
        Self {
            owner: Arc::clone(&self.owner),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<A> core::fmt::Debug for Subscriber<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscriber")
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

/// One entry in a channel's subscriber list.
pub struct Registration<A> {
    /// Id assigned when the subscriber was registered.
    pub id: SubscriptionId,
    /// The registered handle.
    pub subscriber: Subscriber<A>,
}

impl<A> Registration<A> {
    /// Register `subscriber` under a fresh id.
    pub fn new(subscriber: Subscriber<A>) -> Self {
        Self {
            id: SubscriptionId::new(),
            subscriber,
        }
    }
}

impl<A> Clone for Registration<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            subscriber: self.subscriber.clone(),
        }
    }
}

impl<A> core::fmt::Debug for Registration<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("owner", &self.subscriber.owner())
            .finish()
    }
}
