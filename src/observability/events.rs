//! Lifecycle events
//!
//! Events are explicit and typed. Each is emitted once in the `event` field
//! of a log line.

use std::fmt;

/// Observable lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration parsed from arguments and environment
    ConfigLoaded,
    /// Startup aborted
    BootFailed,
    /// Server listening, ready for requests
    Serving,
    /// Shutdown signal received
    ShutdownStart,
    /// Server stopped and store closed
    ShutdownComplete,

    // Store
    /// Store opened (and journal replayed, if any)
    StoreOpened,
    /// Store flushed and closed
    StoreClosed,
    /// A store call failed while serving a request
    StoreFailure,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::BootFailed => "BOOT_FAILED",
            Event::Serving => "SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::StoreOpened => "STORE_OPENED",
            Event::StoreClosed => "STORE_CLOSED",
            Event::StoreFailure => "STORE_FAILURE",
        }
    }

    /// Returns whether this event ends the process
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::BootFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::BootStart.as_str(), "BOOT_START");
        assert_eq!(Event::Serving.to_string(), "SERVING");
        assert_eq!(Event::StoreFailure.as_str(), "STORE_FAILURE");
    }

    #[test]
    fn test_only_boot_failure_is_fatal() {
        assert!(Event::BootFailed.is_fatal());
        assert!(!Event::StoreFailure.is_fatal());
        assert!(!Event::ShutdownComplete.is_fatal());
    }
}
