//! Fault-isolating dispatch.
//!
//! [`raise_event`] invokes a list of registrations one after another. Each
//! handler runs under its own fault boundary: an `Err` return or a panic is
//! turned into a [`SubscriberFault`], reported to the monitor, and the loop
//! moves on to the next registration. Nothing escapes to the caller.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::trace;

use crate::error::SubscriberFault;
use crate::monitor::Monitor;
use crate::subscriber::Registration;

/// Outcome counters for one publish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Registrations that were invoked.
    pub invoked: usize,
    /// Registrations that returned an error or panicked.
    pub faulted: usize,
}

impl DispatchReport {
    /// Registrations that completed without a fault.
    pub const fn succeeded(&self) -> usize {
        self.invoked.saturating_sub(self.faulted)
    }

    /// Whether every invoked registration completed without a fault.
    pub const fn is_clean(&self) -> bool {
        self.faulted == 0
    }

    /// Add another report's counters to this one.
    pub const fn merge(&mut self, other: Self) {
        self.invoked = self.invoked.saturating_add(other.invoked);
        self.faulted = self.faulted.saturating_add(other.faulted);
    }
}

/// Invoke every registration in order, isolating failures.
///
/// An empty list returns immediately without touching the monitor.
pub fn raise_event<A>(
    monitor: &dyn Monitor,
    event_name: &str,
    subscribers: &[Registration<A>],
    sender: Option<&str>,
    args: &A,
) -> DispatchReport {
    let mut report = DispatchReport::default();
    if subscribers.is_empty() {
        return report;
    }

    trace!(event = event_name, subscribers = subscribers.len(), "Raising event");

    for registration in subscribers {
        report.invoked = report.invoked.saturating_add(1);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            registration.subscriber.call(sender, args)
        }));

        let fault = match outcome {
            Ok(Ok(())) => continue,
            Ok(Err(err)) => SubscriberFault::Failed {
                event: event_name.to_owned(),
                owner: registration.subscriber.owner().to_owned(),
                subscription_id: registration.id,
                message: format!("{err:#}"),
            },
            Err(payload) => SubscriberFault::Panicked {
                event: event_name.to_owned(),
                owner: registration.subscriber.owner().to_owned(),
                subscription_id: registration.id,
                message: panic_message(payload.as_ref()),
            },
        };

        report.faulted = report.faulted.saturating_add(1);
        monitor.report_fault(&fault);
    }

    report
}

/// Render a panic payload as text.
///
/// `panic!` payloads are either `&'static str` or `String`; anything else
/// is described generically.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| String::from("non-string panic payload"))
}
