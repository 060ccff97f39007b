use std::{fmt, sync::Mutex};

/// A non-fatal diagnostic about a feature the target dialect cannot honour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub dialect: &'static str,
    pub operation: &'static str,
    pub message: String,
}

impl Notice {
    pub fn new(dialect: &'static str, operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            dialect,
            operation,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.dialect, self.operation, self.message)
    }
}

pub trait Logger: Send + Sync {
    fn warn(&self, notice: Notice);
}

/// Routes notices to `tracing` as `WARN` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, notice: Notice) {
        tracing::warn!(
            dialect = notice.dialect,
            operation = notice.operation,
            "{}",
            notice.message
        );
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn warn(&self, _notice: Notice) {}
}

/// Keeps every notice in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingLogger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.notices.lock().map(|notices| notices.len()).unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.clear();
        }
    }
}

impl Logger for RecordingLogger {
    fn warn(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}
