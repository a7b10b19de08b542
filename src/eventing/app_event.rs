//! AppEvent - Application Event Enum
//!
//! All events that the session surfaces to the front-end layer.

use chrono::{DateTime, Local};

use crate::app::navigation::PageKind;
use crate::error::HandshakeError;

/// Severity of a surfaced log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

impl LogLevel {
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// Application events for session -> front-end communication
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Log message
    Log {
        level: LogLevel,
        message: String,
        timestamp: DateTime<Local>,
    },

    /// Gateway connection status changed
    ConnectionChanged {
        connected: bool,
        detail: Option<String>,
    },

    /// Handshake completed and a fresh installation is in place
    InstallationReady {
        device_access_id: String,
        driver: &'static str,
        inverters: usize,
        solar_chargers: usize,
        batteries: usize,
    },

    /// Handshake failed, the connection has been closed
    HandshakeFailed { title: &'static str, message: String },

    /// Another page became active
    PageChanged { page: PageKind },
}

impl AppEvent {
    /// Create a log event with current timestamp
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self::Log {
            level,
            message: message.into(),
            timestamp: Local::now(),
        }
    }

    /// Create an info log event
    pub fn info(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Info, message)
    }

    /// Create a warning log event
    pub fn warn(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Warn, message)
    }

    /// Create an error log event
    pub fn error(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Error, message)
    }

    /// Create a debug log event
    pub fn debug(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Debug, message)
    }

    pub fn handshake_failed(error: &HandshakeError) -> Self {
        Self::HandshakeFailed {
            title: error.title(),
            message: error.to_string(),
        }
    }
}
