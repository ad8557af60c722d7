/// Error types for the cluster request mapper
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while mapping form values into a request
#[derive(Debug, Error)]
pub enum MapperError {
    /// A field required by the selected deployment route is absent
    #[error("Missing form field: {0}")]
    MissingField(&'static str),

    /// A document field holds a value that cannot be read as the expected type
    #[error("Invalid value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    /// Local machine deployments need at least the master server
    #[error("At least one database server is required for a local machine cluster")]
    NoDatabaseServers,

    /// An extension references a database that is not in the databases list
    #[error("Extension '{extension}' references database #{index}, but only {available} database(s) are defined")]
    DatabaseIndexOutOfRange {
        extension: String,
        index: usize,
        available: usize,
    },

    /// Two extra-vars sections produced different values for the same key
    #[error("Conflicting values for extra var '{0}'")]
    KeyCollision(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Reading an input document failed
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, MapperError>;
