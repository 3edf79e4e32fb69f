//! Session replay loop.
//!
//! [`run_session`] feeds one scripted tick per interval to the
//! [`PlayerTracker`], stopping when the script ends, when `max_ticks` is
//! reached, or on Ctrl-C.

use std::time::Duration;

use modkit_core::config::HostConfig;
use modkit_core::tracker::PlayerTracker;
use modkit_events::{DispatchReport, Monitor, PlayerEvents};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::session::SessionScript;

/// Why the replay stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEndReason {
    /// Every scripted tick was replayed.
    ScriptComplete,
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// Interrupted by Ctrl-C.
    Interrupted,
}

/// Totals for a finished replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Why the replay stopped.
    pub end_reason: SessionEndReason,
    /// Ticks replayed.
    pub ticks: u64,
    /// Ticks on which at least one event was raised.
    pub eventful_ticks: u64,
    /// Dispatch counters summed over every event raised.
    pub dispatch: DispatchReport,
}

/// Replay `script` through a fresh tracker.
pub async fn run_session(
    script: &SessionScript,
    events: &PlayerEvents,
    monitor: &dyn Monitor,
    host: &HostConfig,
) -> SessionSummary {
    let mut tracker = PlayerTracker::new();
    let mut summary = SessionSummary {
        end_reason: SessionEndReason::ScriptComplete,
        ticks: 0,
        eventful_ticks: 0,
        dispatch: DispatchReport::default(),
    };

    let mut interval = tokio::time::interval(Duration::from_millis(host.tick_interval_ms.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(
        session = script.name.as_str(),
        ticks = script.len(),
        max_ticks = host.max_ticks,
        tick_interval_ms = host.tick_interval_ms,
        "Session replay starting"
    );

    let mut ticks = script.ticks.iter();
    loop {
        if host.max_ticks > 0 && summary.ticks >= host.max_ticks {
            info!(max_ticks = host.max_ticks, "Tick limit reached");
            summary.end_reason = SessionEndReason::MaxTicksReached;
            break;
        }

        tokio::select! {
            _ = interval.tick() => {}
            result = &mut shutdown => {
                if let Err(e) = result {
                    warn!(error = %e, "Failed to listen for Ctrl-C");
                }
                info!(tick = summary.ticks, "Session interrupted");
                summary.end_reason = SessionEndReason::Interrupted;
                break;
            }
        }

        let Some(entry) = ticks.next() else {
            break;
        };
        summary.ticks = summary.ticks.saturating_add(1);

        match entry {
            Some(snapshot) => {
                let update = tracker.observe(snapshot, events, monitor);
                if update.raised_any() {
                    summary.eventful_ticks = summary.eventful_ticks.saturating_add(1);
                }
                summary.dispatch.merge(update.dispatch);
            }
            None => {
                debug!(tick = summary.ticks, "Title screen");
                tracker.reset();
            }
        }
    }

    summary
}
