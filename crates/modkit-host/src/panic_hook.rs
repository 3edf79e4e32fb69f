//! Panic reporting through `tracing`.
//!
//! Subscriber panics are caught by the dispatcher, but the process-wide
//! panic hook still runs first. The default hook writes plain text to
//! stderr, which breaks JSON log output; this one emits a structured event
//! instead.

use std::panic::PanicHookInfo;

use modkit_events::panic_message;
use tracing::error;

/// Replace the default panic hook with one that logs through `tracing`.
pub fn install() {
    std::panic::set_hook(Box::new(log_panic));
}

fn log_panic(info: &PanicHookInfo<'_>) {
    let message = panic_message(info.payload());
    let location = info.location().map(ToString::to_string);
    let thread = std::thread::current();
    error!(
        thread = thread.name().unwrap_or("<unnamed>"),
        location = location.as_deref(),
        panic = message.as_str(),
        "Thread panicked"
    );
}
