//! Error types for the dashboard core
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use snafu::Snafu;

use crate::services::Status;

/// Main error type for the application
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (config file access)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },

    /// Channel send error
    #[snafu(display("Channel send error: {message}"))]
    ChannelSend { message: String },

    /// Gateway connection error
    #[snafu(display("Connection error: {message}"))]
    Connection { message: String },

    /// A page needs an installation but none has been built yet
    #[snafu(display("No installation available for page {page}"))]
    NoInstallation { page: &'static str },
}

/// Failures of the connection handshake. All of them are fatal to the
/// current connection attempt.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum HandshakeError {
    #[snafu(display("Error during device enumeration: {status}"))]
    Enumeration { status: Status },

    #[snafu(display("Error requesting system description: {status}"))]
    Description { status: Status },

    #[snafu(display("Error requesting system description: data missing"))]
    MissingInstances,

    #[snafu(display("Error initializing dashboards: no installation found"))]
    NoInstallationFound,

    #[snafu(display("Error initializing dashboards: multiple installations found ({count})"))]
    MultipleInstallations { count: usize },

    #[snafu(display("Error initializing dashboards: no driver information provided"))]
    MissingDriver,

    #[snafu(display("Error initializing dashboards: no devices"))]
    MissingDevices,

    #[snafu(display("Error initializing dashboards: no device access id"))]
    MissingAccessId,

    #[snafu(display("Error initializing dashboards: driver \"{driver}\" not supported"))]
    UnsupportedDriver { driver: String },

    #[snafu(display("Error requesting system description: {source}"))]
    Malformed { source: serde_json::Error },
}

impl HandshakeError {
    /// Title shown to the user alongside the message
    pub fn title(&self) -> &'static str {
        match self {
            HandshakeError::Enumeration { .. } => "Enumeration error",
            HandshakeError::Description { .. } => "Describe error",
            _ => "Initialize error",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    fn read_missing(path: &std::path::Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    #[test]
    fn io_failures_convert_with_question_mark() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_missing(&dir.path().join("absent.toml")).expect_err("missing file");
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().starts_with("IO error: "));
    }

    #[test]
    fn handshake_failures_carry_a_title() {
        let enumeration = HandshakeError::Enumeration {
            status: Status::Timeout,
        };
        assert_eq!(enumeration.title(), "Enumeration error");
        assert_eq!(HandshakeError::MissingDevices.title(), "Initialize error");
        assert_eq!(
            HandshakeError::UnsupportedDriver {
                driver: "Xtender".to_string()
            }
            .to_string(),
            "Error initializing dashboards: driver \"Xtender\" not supported"
        );
    }
}
