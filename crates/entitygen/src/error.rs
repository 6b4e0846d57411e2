//! Error types for the generator library.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code for configuration errors (missing or invalid flags).
pub const EXIT_CONFIG_ERROR: u8 = 2;
/// Exit code for connection failures.
pub const EXIT_CONNECTION_ERROR: u8 = 3;
/// Exit code for metadata prepare/query/scan failures.
pub const EXIT_METADATA_ERROR: u8 = 4;
/// Exit code for file and serialization errors.
pub const EXIT_IO_ERROR: u8 = 7;

/// Main error type for generation runs.
#[derive(Error, Debug)]
pub enum GenError {
    /// Configuration error (missing flag, unknown dialect, bad entity name, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Driver could not open a connection
    #[error("Connection error ({dialect}): {message}")]
    Connection { dialect: String, message: String },

    /// The metadata query could not be prepared
    #[error("Failed to prepare metadata query: {0}")]
    Prepare(String),

    /// The metadata query failed for an entity
    #[error("Metadata query failed for entity {entity}: {message}")]
    Query { entity: String, message: String },

    /// A metadata row could not be decoded
    #[error("Could not decode metadata row for entity {entity}: {message}")]
    Scan { entity: String, message: String },

    /// A catalog-supplied name is not safe to emit
    #[error("Invalid {kind} identifier {name:?} in entity {entity}")]
    InvalidIdentifier {
        kind: &'static str,
        name: String,
        entity: String,
    },

    /// Writing the artifact failed
    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error (stdout, temp files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenError {
    /// Create a Connection error for a dialect
    pub fn connection(dialect: impl Into<String>, message: impl ToString) -> Self {
        GenError::Connection {
            dialect: dialect.into(),
            message: message.to_string(),
        }
    }

    /// Create a Query error for an entity
    pub fn query(entity: impl Into<String>, message: impl ToString) -> Self {
        GenError::Query {
            entity: entity.into(),
            message: message.to_string(),
        }
    }

    /// Create a Scan error for an entity
    pub fn scan(entity: impl Into<String>, message: impl ToString) -> Self {
        GenError::Scan {
            entity: entity.into(),
            message: message.to_string(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            GenError::Config(_) => EXIT_CONFIG_ERROR,
            GenError::Connection { .. } => EXIT_CONNECTION_ERROR,
            GenError::Prepare(_)
            | GenError::Query { .. }
            | GenError::Scan { .. }
            | GenError::InvalidIdentifier { .. } => EXIT_METADATA_ERROR,
            GenError::Write { .. } | GenError::Io(_) | GenError::Json(_) => EXIT_IO_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, GenError>;
