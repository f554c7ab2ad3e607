//! Alert sink that records messages instead of showing them.

use std::sync::{Arc, Mutex};

use crate::board::ports::AlertSink;

/// Collects alerts for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingAlertSink {
    alerts: Arc<Mutex<Vec<String>>>,
}

impl RecordingAlertSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every alert raised so far, oldest first.
    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl AlertSink for RecordingAlertSink {
    fn alert(&self, message: &str) {
        self.alerts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(message.to_owned());
    }
}
