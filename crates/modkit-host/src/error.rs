//! Error types for the host binary.
//!
//! [`HostError`] wraps every failure mode during startup so `main` can
//! propagate with `?`. Subscriber faults are not errors here; the registry
//! recovers them.

/// Top-level error for the host binary.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: modkit_core::config::ConfigError,
    },

    /// Session script loading failed.
    #[error("session error: {source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: crate::session::SessionError,
    },

    /// The tracing subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the failure.
        message: String,
    },
}
