//! Error types for profile loading and resolution

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lintrc operations
#[derive(Debug, Error)]
pub enum LintrcError {
    /// A profile id (requested or extended) has no registered profile
    #[error("{}", describe_missing(.id, .referenced_by.as_deref()))]
    ProfileNotFound {
        id: String,
        referenced_by: Option<String>,
    },

    /// The extension graph reachable from the requested profile has a cycle
    #[error("Cyclic extension detected: {}", format_chain(.chain))]
    CyclicExtension { chain: Vec<String> },

    /// An override glob pattern failed to compile
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlobPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Two profiles registered under the same id
    #[error("Profile '{id}' is already registered")]
    DuplicateProfile { id: String },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// A configuration file could not be deserialized
    #[error("Failed to parse '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raised by `resolve` itself
    Resolution,
    /// Raised while building the registry
    Registry,
    Config,
    Parse,
    Io,
}

fn format_chain(chain: &[String]) -> String {
    chain.join(" → ")
}

fn describe_missing(id: &str, referenced_by: Option<&str>) -> String {
    match referenced_by {
        Some(parent) => format!("Profile not found: '{id}' (extended by '{parent}')"),
        None => format!("Profile not found: '{id}'"),
    }
}

impl LintrcError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LintrcError::ProfileNotFound { .. }
            | LintrcError::CyclicExtension { .. }
            | LintrcError::InvalidGlobPattern { .. } => ErrorKind::Resolution,
            LintrcError::DuplicateProfile { .. } => ErrorKind::Registry,
            LintrcError::ConfigError { .. } => ErrorKind::Config,
            LintrcError::ParseError { .. } => ErrorKind::Parse,
            LintrcError::IoError { .. } => ErrorKind::Io,
        }
    }

    /// Create a profile-not-found error
    pub fn profile_not_found(id: impl Into<String>, referenced_by: Option<&str>) -> Self {
        Self::ProfileNotFound {
            id: id.into(),
            referenced_by: referenced_by.map(str::to_string),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a parse error for a file
    pub fn parse_error(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::ParseError {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}
