//! Error types for the Archives App integration.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for Archives App operations.
pub type ArchivesResult<T> = Result<T, ArchivesError>;

/// Top-level error type for the Archives App integration.
///
/// HTTP error statuses are not represented here: a 4xx or 5xx answer from the
/// server is an ordinary response and is handed back to the caller as such.
#[derive(Debug, Error)]
pub enum ArchivesError {
    /// Invalid combination of arguments, detected before any I/O.
    #[error("Precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    /// The file to upload could not be opened for reading.
    #[error("Cannot access file {}: {source}", .path.display())]
    FilesystemAccess {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Network, TLS or HTTP layer failure.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl ArchivesError {
    /// Creates a filesystem access error for `path`.
    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ArchivesError::FilesystemAccess {
            path: path.into(),
            source,
        }
    }

    /// Creates a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        ArchivesError::Configuration(ConfigurationError::InvalidConfiguration(msg.into()))
    }

    /// Returns true if this is a precondition failure.
    pub fn is_precondition(&self) -> bool {
        matches!(self, ArchivesError::Precondition(_))
    }

    /// Returns true if this is a filesystem access failure.
    pub fn is_filesystem(&self) -> bool {
        matches!(self, ArchivesError::FilesystemAccess { .. })
    }

    /// Returns true if this is a transport failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, ArchivesError::Transport(_))
    }
}

/// Argument validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreconditionError {
    /// Archiving needs a destination path, or both a filing code and a project number.
    #[error("Either destination_path or both filing_code and project_number must be provided")]
    MissingArchiveDestination,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Base URL could not be parsed.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The resolved URL.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// A credential cannot be sent as an HTTP header value.
    #[error("Invalid credential header '{0}'")]
    InvalidCredentialHeader(&'static str),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection could not be established.
    #[error("Network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// HTTP protocol or body error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Network(err.to_string())
        } else {
            TransportError::Http(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let error = ArchivesError::from(PreconditionError::MissingArchiveDestination);
        assert!(error.is_precondition());
        assert!(!error.is_transport());

        let error = ArchivesError::filesystem(
            "/missing.pdf",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert!(error.is_filesystem());
        assert!(error.to_string().contains("/missing.pdf"));

        let error = ArchivesError::from(TransportError::Network("refused".to_string()));
        assert!(error.is_transport());
    }

    #[test]
    fn test_filesystem_error_keeps_source() {
        use std::error::Error as _;

        let error = ArchivesError::filesystem(
            "report.pdf",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let source = error.source().expect("source");
        assert_eq!(source.to_string(), "denied");
    }
}
