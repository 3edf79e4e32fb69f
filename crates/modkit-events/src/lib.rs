//! Player event channels with fault-isolated subscriber dispatch.
//!
//! Mods subscribe callbacks to named channels; the host raises events
//! through [`PlayerEvents`]. Every publish notifies a snapshot of the
//! subscriber list in registration order, and a subscriber that fails
//! (returns an error or panics) is reported to a [`Monitor`] without
//! stopping the others.
//!
//! # Modules
//!
//! - [`channel`] -- [`EventChannel`]: ordered subscriber list with copy-on-publish
//! - [`dispatch`] -- [`raise_event`]: sequential invocation with per-call fault capture
//! - [`error`] -- [`SubscriberFault`]
//! - [`monitor`] -- [`Monitor`] trait, [`TracingMonitor`], [`RecordingMonitor`], [`CountingMonitor`]
//! - [`player`] -- [`PlayerEvents`] registry and its `invoke_*` operations
//! - [`subscriber`] -- [`Subscriber`] handles and channel registrations

pub mod channel;
pub mod dispatch;
pub mod error;
pub mod monitor;
pub mod player;
pub mod subscriber;

pub use channel::EventChannel;
pub use dispatch::{DispatchReport, panic_message, raise_event};
pub use error::SubscriberFault;
pub use monitor::{
    CountingMonitor, FaultRecord, LogEntry, LogLevel, Monitor, RecordingMonitor, TracingMonitor,
};
pub use player::PlayerEvents;
pub use subscriber::{HandlerFn, Registration, Subscriber};
