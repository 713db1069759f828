//! Logging Module
//! Log-sink capability so callers and tests choose where messages go.

use log::{error, info};

/// Destination for loader diagnostics.
///
/// The loader holds one of these instead of calling a process-wide logger
/// directly; tests inject a capturing implementation.
pub trait EventLog: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards events to the process-wide `log` facade.
#[derive(Debug, Default)]
pub struct FacadeLog;

impl EventLog for FacadeLog {
    fn info(&self, message: &str) {
        info!("{message}");
    }

    fn error(&self, message: &str) {
        error!("{message}");
    }
}
