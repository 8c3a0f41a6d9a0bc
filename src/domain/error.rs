use std::io;

use thiserror::Error;

/// Library-wide error type for makei operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// No `iproj.json` found at the project root.
    #[error("Project descriptor not found: {0}")]
    ProjectDescriptorMissing(String),

    /// A field the build cannot be seeded without is absent from `iproj.json`.
    #[error("Project descriptor {path} is missing required field '{field}'")]
    MissingDescriptorField { field: &'static str, path: String },

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Source tree traversal or `Rules.mk` read failed.
    #[error("Failed to scan {path}: {details}")]
    Discovery { path: String, details: String },

    /// The make process could not be started.
    #[error("Failed to run '{command}': {details}")]
    MakeSpawn { command: String, details: String },

    /// The build was interrupted while make was running.
    #[error("Build interrupted")]
    Interrupted,

    /// Source file extension has no known object type.
    #[error("Cannot determine target for source file '{0}': unrecognized extension")]
    UnknownSourceType(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn parse_error(what: impl Into<String>, err: impl ToString) -> Self {
        AppError::ParseError { what: what.into(), details: err.to_string() }
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::MissingDescriptorField { .. }
            | AppError::ParseError { .. }
            | AppError::UnknownSourceType(_) => io::ErrorKind::InvalidInput,
            AppError::ProjectDescriptorMissing(_) => io::ErrorKind::NotFound,
            AppError::Discovery { .. } | AppError::MakeSpawn { .. } => io::ErrorKind::Other,
            AppError::Interrupted => io::ErrorKind::Interrupted,
        }
    }
}
