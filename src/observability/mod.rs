//! Observability subsystem for propdiag
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle events
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on evaluation
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use propdiag::observability::{log_event_with_fields, Event, Logger};
//!
//! Logger::info("KB_LOADED", &[("rules", "12")]);
//! log_event_with_fields(Event::FactIgnored, &[("code", "f99")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event at INFO (or FATAL for fatal events)
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields at INFO (or FATAL for fatal events)
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    match lifecycle_severity(event) {
        Severity::Fatal => Logger::fatal(event.as_str(), fields),
        _ => Logger::info(event.as_str(), fields),
    }
}

/// Log a recoverable condition at WARN
pub fn warn_event(event: Event, fields: &[(&str, &str)]) {
    Logger::warn(event.as_str(), fields);
}

fn lifecycle_severity(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    }
}
