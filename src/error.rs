//! Error types for model loading, validation, and schema generation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading an extracted model or a generator configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid model: {source}")]
    InvalidModel {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {source}")]
    InvalidConfig {
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            LoadError::NetworkError { .. } => 3,
            LoadError::InvalidModel { .. } => 1,
            _ => 2,
        }
    }
}

/// Errors during schema graph generation.
///
/// Every variant names a violated precondition of the input model or of the
/// generator's own call protocol. Unresolvable external super-types are not
/// errors; they are recorded as diagnostics.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("inheritance cycle: {}", chain.join(" -> "))]
    InheritanceCycle { chain: Vec<String> },

    #[error("'{subtype}' cannot inherit from enumeration '{supertype}'")]
    InvalidSuperType { subtype: String, supertype: String },

    #[error("members of '{name}' were already completed")]
    AlreadyCompleted { name: String },

    #[error("completion pass already ran; no further declarations can be resolved")]
    CompletionClosed,

    #[error("declaration '{name}' is already registered")]
    DuplicateDeclaration { name: String },

    #[error("no declaration registered for '{name}'")]
    UnknownDeclaration { name: String },

    #[error("invalid data type in '{owner}': {message}")]
    InvalidDataType { owner: String, message: String },

    #[error("invalid nested type path \"{path}\" for '{name}'")]
    InvalidNestedPath { name: String, path: String },
}

impl GenerateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Errors during validation of raw model JSON.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("model validation failed with {} error(s)", errors.len())]
    Invalid { errors: Vec<ModelError> },
}

/// Single validation error with path context.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ModelError {
    /// JSON Pointer (RFC 6901) to the invalid element.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl ValidateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ValidateError::Load(e) => e.exit_code(),
            ValidateError::Invalid { .. } => 1,
        }
    }
}
