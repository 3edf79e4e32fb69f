//! Monitoring and logging collaborator.
//!
//! The publisher never logs on its own behalf when a subscriber fails; it
//! hands the fault to a [`Monitor`]. [`TracingMonitor`] writes to `tracing`.
//! [`RecordingMonitor`] keeps everything in memory so callers can inspect
//! what went wrong after the fact. [`CountingMonitor`] only counts, for
//! hosts that run indefinitely.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use modkit_types::SubscriptionId;
use tracing::{debug, error, info, trace, warn};

use crate::error::SubscriberFault;

/// Severity of a monitor log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Fine-grained tracing.
    Trace,
    /// Diagnostic detail.
    Debug,
    /// Normal operation.
    Info,
    /// Something unexpected that was recovered.
    Warn,
    /// A failure.
    Error,
}

/// Encapsulates monitoring and logging for a component.
pub trait Monitor: Send + Sync {
    /// Log a message.
    fn log(&self, level: LogLevel, message: &str);

    /// Report a subscriber fault. Must not panic.
    fn report_fault(&self, fault: &SubscriberFault) {
        self.log(
            LogLevel::Error,
            &format!(
                "A subscriber ({}) failed handling the {} event:\n{}",
                fault.owner(),
                fault.event(),
                fault.message()
            ),
        );
    }
}

impl<M: Monitor + ?Sized> Monitor for Arc<M> {
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message);
    }

    fn report_fault(&self, fault: &SubscriberFault) {
        (**self).report_fault(fault);
    }
}

// ---------------------------------------------------------------------------
// TracingMonitor
// ---------------------------------------------------------------------------

/// Monitor that writes to `tracing`, tagging every line with a source label.
#[derive(Debug, Clone)]
pub struct TracingMonitor {
    source: String,
}

impl TracingMonitor {
    /// Create a monitor for the component named `source`.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The source label.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Monitor for TracingMonitor {
    fn log(&self, level: LogLevel, message: &str) {
        let source = self.source.as_str();
        match level {
            LogLevel::Trace => trace!(source, "{message}"),
            LogLevel::Debug => debug!(source, "{message}"),
            LogLevel::Info => info!(source, "{message}"),
            LogLevel::Warn => warn!(source, "{message}"),
            LogLevel::Error => error!(source, "{message}"),
        }
    }

    fn report_fault(&self, fault: &SubscriberFault) {
        error!(
            source = self.source.as_str(),
            event = fault.event(),
            owner = fault.owner(),
            subscription_id = %fault.subscription_id(),
            panicked = fault.is_panic(),
            error = fault.message(),
            "Subscriber failed handling event"
        );
    }
}

// ---------------------------------------------------------------------------
// RecordingMonitor
// ---------------------------------------------------------------------------

/// A log line captured by [`RecordingMonitor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Severity.
    pub level: LogLevel,
    /// Message text.
    pub message: String,
}

/// A fault captured by [`RecordingMonitor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultRecord {
    /// When the fault was reported.
    pub at: DateTime<Utc>,
    /// Event being raised.
    pub event: String,
    /// Owner of the failing subscriber.
    pub owner: String,
    /// Registration that failed.
    pub subscription_id: SubscriptionId,
    /// Whether the handler panicked.
    pub panicked: bool,
    /// Failure description.
    pub message: String,
}

impl From<&SubscriberFault> for FaultRecord {
    fn from(fault: &SubscriberFault) -> Self {
        Self {
            at: Utc::now(),
            event: fault.event().to_owned(),
            owner: fault.owner().to_owned(),
            subscription_id: fault.subscription_id(),
            panicked: fault.is_panic(),
            message: fault.message().to_owned(),
        }
    }
}

/// Monitor that keeps logs and faults in memory, optionally forwarding them
/// to another monitor.
#[derive(Default)]
pub struct RecordingMonitor {
    logs: Mutex<Vec<LogEntry>>,
    faults: Mutex<Vec<FaultRecord>>,
    forward: Option<Arc<dyn Monitor>>,
}

impl RecordingMonitor {
    /// Create a monitor that only records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a monitor that records and then forwards to `inner`.
    pub fn forwarding_to(inner: Arc<dyn Monitor>) -> Self {
        Self {
            forward: Some(inner),
            ..Self::default()
        }
    }

    /// Copy of every recorded log line.
    pub fn logs(&self) -> Vec<LogEntry> {
        lock(&self.logs).clone()
    }

    /// Copy of every recorded fault.
    pub fn faults(&self) -> Vec<FaultRecord> {
        lock(&self.faults).clone()
    }

    /// Number of recorded faults.
    pub fn fault_count(&self) -> usize {
        lock(&self.faults).len()
    }

    /// Drop everything recorded so far.
    pub fn clear(&self) {
        lock(&self.logs).clear();
        lock(&self.faults).clear();
    }
}

impl core::fmt::Debug for RecordingMonitor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RecordingMonitor")
            .field("logs", &lock(&self.logs).len())
            .field("faults", &lock(&self.faults).len())
            .field("forwarding", &self.forward.is_some())
            .finish()
    }
}

impl Monitor for RecordingMonitor {
    fn log(&self, level: LogLevel, message: &str) {
        lock(&self.logs).push(LogEntry {
            level,
            message: message.to_owned(),
        });
        if let Some(inner) = &self.forward {
            inner.log(level, message);
        }
    }

    fn report_fault(&self, fault: &SubscriberFault) {
        lock(&self.faults).push(FaultRecord::from(fault));
        if let Some(inner) = &self.forward {
            inner.report_fault(fault);
        }
    }
}

// ---------------------------------------------------------------------------
// CountingMonitor
// ---------------------------------------------------------------------------

/// Monitor that counts faults and forwards everything to an inner monitor.
///
/// Memory use is constant no matter how many faults are reported.
pub struct CountingMonitor {
    inner: Arc<dyn Monitor>,
    faults: AtomicU64,
}

impl CountingMonitor {
    /// Wrap `inner`.
    pub const fn new(inner: Arc<dyn Monitor>) -> Self {
        Self {
            inner,
            faults: AtomicU64::new(0),
        }
    }

    /// Faults reported so far.
    pub fn fault_count(&self) -> u64 {
        self.faults.load(Ordering::Relaxed)
    }
}

impl core::fmt::Debug for CountingMonitor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CountingMonitor")
            .field("faults", &self.faults)
            .finish_non_exhaustive()
    }
}

impl Monitor for CountingMonitor {
    fn log(&self, level: LogLevel, message: &str) {
        self.inner.log(level, message);
    }

    fn report_fault(&self, fault: &SubscriberFault) {
        self.faults.fetch_add(1, Ordering::Relaxed);
        self.inner.report_fault(fault);
    }
}

// Subscribers never run while these locks are held.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fault(owner: &str) -> SubscriberFault {
        SubscriberFault::Failed {
            event: String::from("PlayerEvents.InventoryChanged"),
            owner: owner.to_owned(),
            subscription_id: SubscriptionId::new(),
            message: String::from("bad item"),
        }
    }

    #[test]
    fn recording_monitor_keeps_faults_in_order() {
        let monitor = RecordingMonitor::new();
        monitor.report_fault(&fault("first"));
        monitor.report_fault(&fault("second"));

        let owners: Vec<String> = monitor.faults().into_iter().map(|f| f.owner).collect();
        assert_eq!(owners, vec!["first", "second"]);
        assert_eq!(monitor.fault_count(), 2);

        monitor.clear();
        assert_eq!(monitor.fault_count(), 0);
    }

    #[test]
    fn default_report_fault_logs_an_error() {
        struct LogOnly(RecordingMonitor);
        impl Monitor for LogOnly {
            fn log(&self, level: LogLevel, message: &str) {
                self.0.log(level, message);
            }
        }

        let monitor = LogOnly(RecordingMonitor::new());
        monitor.report_fault(&fault("chest-sorter"));

        let logs = monitor.0.logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs.first().map(|l| l.level), Some(LogLevel::Error));
        assert!(logs.first().is_some_and(|l| l.message.contains("chest-sorter")));
        assert!(logs.first().is_some_and(|l| l.message.contains("PlayerEvents.InventoryChanged")));
    }

    #[test]
    fn forwarding_monitor_passes_everything_through() {
        let inner = Arc::new(RecordingMonitor::new());
        let outer = RecordingMonitor::forwarding_to(inner.clone());

        outer.log(LogLevel::Info, "hello");
        outer.report_fault(&fault("mod"));

        assert_eq!(outer.logs().len(), 1);
        assert_eq!(inner.logs().len(), 1);
        assert_eq!(inner.fault_count(), 1);
    }

    #[test]
    fn counting_monitor_counts_and_forwards_without_storing() {
        let inner = Arc::new(RecordingMonitor::new());
        let counter = CountingMonitor::new(inner.clone());

        for _ in 0..1000 {
            counter.report_fault(&fault("flaky"));
        }
        counter.log(LogLevel::Warn, "still running");

        assert_eq!(counter.fault_count(), 1000);
        assert_eq!(inner.fault_count(), 1000);
        assert_eq!(inner.logs().len(), 1);
        assert_eq!(
            format!("{counter:?}"),
            "CountingMonitor { faults: 1000, .. }"
        );
    }

    #[test]
    fn tracing_monitor_accepts_all_levels() {
        let monitor = TracingMonitor::new("test");
        for level in [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ] {
            monitor.log(level, "message");
        }
        monitor.report_fault(&fault("mod"));
        assert_eq!(monitor.source(), "test");
    }
}
