//! Observability for the exercise tracker
//!
//! - Structured logging through `tracing` (text or JSON lines)
//! - Verbosity from `RUST_LOG`, defaulting to `info`
//! - Typed lifecycle events in the `event` field
//!
//! # Usage
//!
//! ```ignore
//! use exercise_tracker::observability::{init_logging, log_event, Event, LogFormat};
//!
//! init_logging(LogFormat::Json);
//! log_event(Event::BootStart);
//! ```

mod events;

pub use events::Event;

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Installs the global subscriber. Returns `false` when one was already
/// installed, in which case the existing subscriber is kept.
pub fn init_logging(format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "global subscriber already installed");
            false
        }
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    if event.is_fatal() {
        tracing::error!(event = event.as_str());
    } else {
        tracing::info!(event = event.as_str());
    }
}
