//! Error types for the access control library

use thiserror::Error;

/// Result type for access control operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying a permission table
#[derive(Error, Debug)]
pub enum Error {
    #[error("Access denied for subject at path: {path}")]
    AccessDenied { path: String },

    #[error("Invalid permission table: {0}")]
    InvalidTable(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
