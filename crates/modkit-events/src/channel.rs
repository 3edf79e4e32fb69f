//! Named event channels.
//!
//! An [`EventChannel`] is an ordered subscriber list behind a mutex.
//! Publishing copies the list under the lock and dispatches with the lock
//! released, so handlers may subscribe or unsubscribe (on this or any other
//! channel) without deadlocking and without disturbing the in-flight
//! notification.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use modkit_types::SubscriptionId;
use tracing::debug;

use crate::dispatch::{self, DispatchReport};
use crate::monitor::Monitor;
use crate::subscriber::{Registration, Subscriber};

/// A named slot holding an ordered sequence of subscribers.
pub struct EventChannel<A> {
    name: &'static str,
    registrations: Mutex<Vec<Registration<A>>>,
    published: AtomicU64,
}

impl<A> EventChannel<A> {
    /// Create an empty channel.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            registrations: Mutex::new(Vec::new()),
            published: AtomicU64::new(0),
        }
    }

    /// Channel name as reported to the monitor.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Append `subscriber` to the end of the list.
    ///
    /// No uniqueness check: registering the same handle twice notifies it
    /// twice.
    pub fn subscribe(&self, subscriber: &Subscriber<A>) -> SubscriptionId {
        let registration = Registration::new(subscriber.clone());
        let id = registration.id;
        let count = {
            let mut regs = self.lock();
            regs.push(registration);
            regs.len()
        };
        debug!(
            channel = self.name,
            owner = subscriber.owner(),
            subscription_id = %id,
            subscribers = count,
            "Subscriber registered"
        );
        id
    }

    /// Remove the first registration of `subscriber`'s handle.
    ///
    /// Returns `false` if it was not registered.
    pub fn unsubscribe(&self, subscriber: &Subscriber<A>) -> bool {
        self.remove_first(|r| r.subscriber.same_handler(subscriber))
    }

    /// Remove the registration with the given id.
    ///
    /// Returns `false` if no such registration exists.
    pub fn unsubscribe_id(&self, id: SubscriptionId) -> bool {
        self.remove_first(|r| r.id == id)
    }

    /// Number of current registrations.
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove every registration.
    pub fn clear(&self) {
        let removed = {
            let mut regs = self.lock();
            let n = regs.len();
            regs.clear();
            n
        };
        if removed > 0 {
            debug!(channel = self.name, removed, "Channel cleared");
        }
    }

    /// Copy of the current registrations, in notification order.
    pub fn snapshot(&self) -> Vec<Registration<A>> {
        self.lock().clone()
    }

    /// Number of publishes attempted on this channel.
    pub fn publish_count(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    /// Notify every current subscriber with `args`.
    ///
    /// The subscriber list is copied at call time; changes made while
    /// handlers run take effect from the next publish. Faults go to
    /// `monitor` and never escape.
    pub fn publish(&self, monitor: &dyn Monitor, sender: Option<&str>, args: &A) -> DispatchReport {
        self.published.fetch_add(1, Ordering::Relaxed);

        let snapshot = {
            let regs = self.lock();
            if regs.is_empty() {
                return DispatchReport::default();
            }
            regs.clone()
        };

        dispatch::raise_event(monitor, self.name, &snapshot, sender, args)
    }

    fn remove_first(&self, matches: impl Fn(&Registration<A>) -> bool) -> bool {
        let removed = {
            let mut regs = self.lock();
            let index = regs.iter().position(&matches);
            index.map(|index| regs.remove(index))
        };
        let Some(registration) = removed else {
            return false;
        };
        debug!(
            channel = self.name,
            owner = registration.subscriber.owner(),
            subscription_id = %registration.id,
            "Subscriber removed"
        );
        true
    }

    // Handlers never run while the lock is held, so a poisoned lock still
    // guards a consistent list.
    fn lock(&self) -> MutexGuard<'_, Vec<Registration<A>>> {
        self.registrations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A> core::fmt::Debug for EventChannel<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventChannel")
            .field("name", &self.name)
            .field("subscribers", &self.subscriber_count())
            .field("published", &self.publish_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::anyhow;

    use super::*;
    use crate::monitor::RecordingMonitor;

    type Log = Arc<Mutex<Vec<&'static str>>>;

    fn tagged(log: &Log, tag: &'static str) -> Subscriber<u32> {
        let log = Arc::clone(log);
        Subscriber::new(tag, move |_, _| {
            if let Ok(mut entries) = log.lock() {
                entries.push(tag);
            }
            Ok(())
        })
    }

    fn entries(log: &Log) -> Vec<&'static str> {
        log.lock().map(|e| e.clone()).unwrap_or_default()
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let channel: EventChannel<u32> = EventChannel::new("Quiet");
        let monitor = RecordingMonitor::new();
        let report = channel.publish(&monitor, None, &1);
        assert_eq!(report, DispatchReport::default());
        assert_eq!(channel.publish_count(), 1);
        assert!(channel.is_empty());
    }

    #[test]
    fn duplicate_registration_notifies_twice() {
        let log = Log::default();
        let channel = EventChannel::new("Dup");
        let a = tagged(&log, "a");
        let first = channel.subscribe(&a);
        let second = channel.subscribe(&a);
        assert_ne!(first, second);

        let report = channel.publish(&RecordingMonitor::new(), None, &0);
        assert_eq!(report.invoked, 2);
        assert_eq!(entries(&log), vec!["a", "a"]);
    }

    #[test]
    fn unsubscribe_removes_first_match_only() {
        let log = Log::default();
        let channel = EventChannel::new("Remove");
        let a = tagged(&log, "a");
        let b = tagged(&log, "b");
        channel.subscribe(&a);
        channel.subscribe(&b);
        channel.subscribe(&a);

        assert!(channel.unsubscribe(&a));
        let owners: Vec<String> = channel
            .snapshot()
            .iter()
            .map(|r| r.subscriber.owner().to_owned())
            .collect();
        assert_eq!(owners, vec!["b", "a"]);
    }

    #[test]
    fn unsubscribe_absent_is_a_no_op() {
        let log = Log::default();
        let channel = EventChannel::new("Absent");
        channel.subscribe(&tagged(&log, "a"));
        assert!(!channel.unsubscribe(&tagged(&log, "a")));
        assert!(!channel.unsubscribe_id(SubscriptionId::new()));
        assert_eq!(channel.subscriber_count(), 1);
    }

    #[test]
    fn unsubscribe_by_id_targets_one_registration() {
        let log = Log::default();
        let channel = EventChannel::new("ById");
        let a = tagged(&log, "a");
        channel.subscribe(&a);
        let second = channel.subscribe(&a);

        assert!(channel.unsubscribe_id(second));
        assert_eq!(channel.subscriber_count(), 1);
        assert!(!channel.unsubscribe_id(second));
    }

    #[test]
    fn failing_subscriber_does_not_block_others() {
        let log = Log::default();
        let channel = EventChannel::new("Faulty");
        channel.subscribe(&Subscriber::new("broken", |_, _: &u32| Err(anyhow!("nope"))));
        channel.subscribe(&tagged(&log, "b"));
        let monitor = RecordingMonitor::new();

        let report = channel.publish(&monitor, None, &0);

        assert_eq!(report.faulted, 1);
        assert_eq!(entries(&log), vec!["b"]);
        assert!(
            monitor
                .faults()
                .first()
                .is_some_and(|f| f.event == "Faulty" && f.owner == "broken")
        );
    }

    #[test]
    fn subscribe_during_publish_waits_for_next_publish() {
        let log = Log::default();
        let channel = Arc::new(EventChannel::new("Reentrant"));
        let late = tagged(&log, "late");

        let chan = Arc::clone(&channel);
        let late_clone = late.clone();
        channel.subscribe(&Subscriber::new("adder", move |_, _: &u32| {
            chan.subscribe(&late_clone);
            Ok(())
        }));

        let first = channel.publish(&RecordingMonitor::new(), None, &0);
        assert_eq!(first.invoked, 1);
        assert!(entries(&log).is_empty());

        let second = channel.publish(&RecordingMonitor::new(), None, &0);
        assert_eq!(second.invoked, 2);
        assert_eq!(entries(&log), vec!["late"]);
    }

    #[test]
    fn debug_shows_name_and_counts() {
        let log = Log::default();
        let channel = EventChannel::new("Debugged");
        channel.subscribe(&tagged(&log, "a"));
        let _ = channel.publish(&RecordingMonitor::new(), None, &0);

        let rendered = format!("{channel:?}");
        assert_eq!(
            rendered,
            r#"EventChannel { name: "Debugged", subscribers: 1, published: 1, .. }"#
        );
    }

    #[test]
    fn clear_empties_channel() {
        let log = Log::default();
        let channel = EventChannel::new("Clear");
        channel.subscribe(&tagged(&log, "a"));
        channel.subscribe(&tagged(&log, "b"));
        channel.clear();
        assert!(channel.is_empty());
        assert_eq!(channel.publish(&RecordingMonitor::new(), None, &0).invoked, 0);
    }
}
