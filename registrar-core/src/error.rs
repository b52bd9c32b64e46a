/// Structured error types for the registrar libraries.
///
/// Uses `thiserror` for typed, composable errors. The binaries compose
/// these with `anyhow` when reporting to the user.

use std::path::PathBuf;
use thiserror::Error;

/// Error taxonomy for a reporting run.
///
/// Every failure in a pipeline lands in one of these buckets; nothing is
/// swallowed or retried. A run that hits any of them exits non-zero.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Could not reach or authenticate to the database
    #[error("database connection failed: {reason}")]
    Connection { reason: String },

    /// A query was rejected by the server
    #[error("query '{context}' failed: {reason}")]
    Query { context: String, reason: String },

    /// A fetched row did not convert into a typed record
    #[error("invalid {context}: {reason}")]
    Data { context: String, reason: String },

    /// An output file could not be written
    #[error("export to {path:?} failed: {reason}")]
    Export { path: PathBuf, reason: String },

    /// Unusable connection configuration
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for registrar operations
pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    /// Create a connection error
    pub fn connection(reason: impl Into<String>) -> Self {
        Self::Connection {
            reason: reason.into(),
        }
    }

    /// Create a query error carrying the failing query's name
    pub fn query(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Query {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Create a row-conversion error
    pub fn data(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Data {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Create an export error carrying the target path
    pub fn export(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Export {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
