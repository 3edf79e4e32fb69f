//! Host binary for modkit.
//!
//! Replays a recorded player session through the player event registry,
//! the same way a game host would drive it from its update loop.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `modkit-config.yaml` (or `MODKIT_CONFIG`)
//! 2. Initialize structured logging (tracing) and route panics through it
//! 3. Load the session script
//! 4. Create the player event registry and the monitor
//! 5. Register built-in logging subscribers
//! 6. Run the tick loop until the script ends, the tick limit, or Ctrl-C
//! 7. Log the summary and tear the registry down

mod error;
mod panic_hook;
mod runner;
mod session;
mod subscribers;

use std::path::PathBuf;
use std::sync::Arc;

use modkit_core::config::{LogFormat, LoggingConfig, ModkitConfig};
use modkit_events::{CountingMonitor, PlayerEvents, TracingMonitor};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::HostError;
use crate::session::SessionScript;

/// Application entry point for the host.
///
/// # Errors
///
/// Returns an error if configuration, logging, or the session script
/// cannot be loaded.
#[tokio::main]
async fn main() -> Result<(), HostError> {
    // 1. Load configuration.
    let (config, config_found) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging)?;
    panic_hook::install();
    info!("modkit-host starting");
    if !config_found {
        info!("Config file not found, using defaults");
    }
    info!(
        host = config.host.name.as_str(),
        tick_interval_ms = config.host.tick_interval_ms,
        max_ticks = config.host.max_ticks,
        session = %config.host.session_path.display(),
        "Configuration loaded"
    );

    // 3. Load the session script.
    let script = SessionScript::from_file(&config.host.session_path)?;
    info!(session = script.name.as_str(), ticks = script.len(), "Session loaded");

    // 4. Create the registry and monitor.
    let events = PlayerEvents::new();
    let monitor = CountingMonitor::new(Arc::new(TracingMonitor::new(config.host.name.clone())));

    // 5. Built-in subscribers.
    if config.events.log_subscribers {
        subscribers::register_logging(&events);
        info!(owner = subscribers::OWNER, "Logging subscribers registered");
    }

    // 6. Run the session.
    let summary = runner::run_session(&script, &events, &monitor, &config.host).await;

    // 7. Summary and teardown.
    let faults = monitor.fault_count();
    if faults > 0 {
        warn!(faults, "Subscribers faulted during the session");
    }
    info!(
        end_reason = ?summary.end_reason,
        ticks = summary.ticks,
        eventful_ticks = summary.eventful_ticks,
        invoked = summary.dispatch.invoked,
        faulted = summary.dispatch.faulted,
        "Session finished"
    );

    events.clear();
    info!("modkit-host shutdown complete");
    Ok(())
}

/// Load configuration from `MODKIT_CONFIG` or `modkit-config.yaml`.
///
/// Returns defaults (with environment overrides) when the file is absent,
/// along with whether a file was found.
fn load_config() -> Result<(ModkitConfig, bool), HostError> {
    let path = std::env::var("MODKIT_CONFIG")
        .map_or_else(|_| PathBuf::from("modkit-config.yaml"), PathBuf::from);
    if path.exists() {
        Ok((ModkitConfig::from_file(&path)?, true))
    } else {
        let mut config = ModkitConfig::default();
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok((config, false))
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the
/// configured level.
fn init_tracing(logging: &LoggingConfig) -> Result<(), HostError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = match logging.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    result.map_err(|e| HostError::Logging {
        message: e.to_string(),
    })
}
