//! Error types for personfinder.
//!
//! Two policies meet here. End-user input errors never become an `Error`:
//! validators resolve them to a default. What does surface is either a
//! programmer error (a validator handed something that is not text), a
//! protocol error (an unknown schema version or a malformed language tag),
//! or an operational failure in config loading or the CLI.
//!
//! Any user-supplied value carried by a variant is HTML-escaped when the
//! error is displayed.

use thiserror::Error;

use crate::escape::escape_html;

/// The main error type for personfinder operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Validation Errors ===
    /// A validator that requires text was handed a non-text value.
    #[error("expected a text value, found {found}")]
    NotText {
        /// Kind of value that was supplied instead.
        found: &'static str,
    },

    /// The requested schema version is not one this crate knows how to serve.
    #[error("unknown schema version: {}", escape_html(.version))]
    UnknownSchemaVersion {
        /// The version string as supplied by the client.
        version: String,
    },

    /// The language tag parameter is malformed.
    #[error("invalid language tag: {}", escape_html(.tag))]
    InvalidLanguageTag {
        /// The tag as supplied by the client.
        tag: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === CLI Errors ===
    /// A command-line argument could not be interpreted.
    #[error("invalid argument: {}", escape_html(.message))]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for personfinder operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an unknown schema version error.
    #[must_use]
    pub fn unknown_schema_version(version: impl Into<String>) -> Self {
        Self::UnknownSchemaVersion {
            version: version.into(),
        }
    }

    /// Create an invalid language tag error.
    #[must_use]
    pub fn invalid_language_tag(tag: impl Into<String>) -> Self {
        Self::InvalidLanguageTag { tag: tag.into() }
    }

    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Check if this error rejects the request itself.
    ///
    /// A request handler turns these into a 4xx response; everything else is
    /// an operational failure on our side.
    #[must_use]
    pub fn is_hard_rejection(&self) -> bool {
        matches!(
            self,
            Self::NotText { .. } | Self::UnknownSchemaVersion { .. } | Self::InvalidLanguageTag { .. }
        )
    }
}
