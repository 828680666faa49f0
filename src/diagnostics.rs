//! Session-scoped diagnostic sink.
//!
//! Components record structured events here instead of writing to a
//! process-wide console. The sink forwards every event to the `log` facade
//! and keeps an in-memory copy so tests can assert on what was emitted.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticEvent {
    pub level: DiagnosticLevel,
    pub message: String,
    pub recorded_at: DateTime<Utc>,
}

/// Cheap to clone; clones share the same event buffer.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    events: Arc<Mutex<Vec<DiagnosticEvent>>>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, level: DiagnosticLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            DiagnosticLevel::Info => log::info!("{}", message),
            DiagnosticLevel::Warn => log::warn!("{}", message),
            DiagnosticLevel::Error => log::error!("{}", message),
        }
        let mut events = self.events.lock().unwrap_or_else(|p| p.into_inner());
        events.push(DiagnosticEvent {
            level,
            message,
            recorded_at: Utc::now(),
        });
    }

    pub fn info(&self, message: impl Into<String>) {
        self.record(DiagnosticLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.record(DiagnosticLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.record(DiagnosticLevel::Error, message);
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clear();
    }
}
