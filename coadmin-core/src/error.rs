//! Structured error types for coadmin-core.
//!
//! The binary wraps these in `anyhow` with context; library callers get
//! enums they can match on.

use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Errors raised by [`crate::editor::RecordEditor`] operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// An operation other than `open` was called while the editor is closed
    #[error("Editor is not open")]
    Closed,

    /// Submit found invalid fields; the editor stays open
    #[error("Validation failed: {0}")]
    Invalid(ValidationErrors),

    /// Selection of an integration the catalog does not offer
    #[error("Unknown integration '{0}'")]
    UnknownIntegration(String),
}

impl EditorError {
    /// Validation errors carried by this error, if any
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            EditorError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Errors raised while building a catalog from configured entries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate integration '{name}' in catalog")]
    Duplicate { name: String },

    #[error("Catalog entry {index} is missing a name or logo")]
    Incomplete { index: usize },
}

/// Errors talking to the companies REST API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, timeout or body decoding failure
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-success status
    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    /// Success response whose body is not the expected JSON
    #[error("Unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Update requested for a company that was never persisted
    #[error("Company '{name}' has no id")]
    MissingId { name: String },
}

impl ApiError {
    pub(crate) fn request(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Request {
            url: url.into(),
            source,
        }
    }
}

/// Errors from [`crate::shell::Shell`] operations that reach the backend
#[derive(Error, Debug)]
pub enum ShellError {
    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors loading `~/.coadmin/config.toml`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid catalog in config: {0}")]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Field, ValidationError};

    #[test]
    fn test_error_display() {
        let err = CatalogError::Duplicate {
            name: "Jira".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate integration 'Jira' in catalog");

        let err = ApiError::MissingId {
            name: "Acme".to_string(),
        };
        assert_eq!(err.to_string(), "Company 'Acme' has no id");
    }

    #[test]
    fn test_editor_error_exposes_validation() {
        let mut errors = ValidationErrors::default();
        errors.insert(Field::Name, ValidationError::NameRequired);
        let err = EditorError::Invalid(errors.clone());

        assert_eq!(err.validation(), Some(&errors));
        assert!(EditorError::Closed.validation().is_none());
        assert!(err.to_string().contains("Company name is required"));
    }

    #[test]
    fn test_catalog_error_converts_into_config_error() {
        let err: ConfigError = CatalogError::Incomplete { index: 2 }.into();
        assert!(matches!(err, ConfigError::Catalog(_)));
    }
}
