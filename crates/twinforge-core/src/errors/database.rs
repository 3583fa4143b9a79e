// ABOUTME: Structured error types for database operations
// ABOUTME: Provides domain-specific errors with context for repository callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

use thiserror::Error;

/// Errors raised by the persistence layer
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// No row matched the given identifier
    #[error("{entity_type} not found: {entity_id}")]
    NotFound {
        /// Kind of entity that was looked up (table-level name)
        entity_type: &'static str,
        /// Identifier that did not match any row
        entity_id: String,
    },

    /// Could not open or acquire a connection
    #[error("Database connection failed: {context}")]
    ConnectionError {
        /// What was being connected to
        context: String,
    },

    /// A statement failed to execute
    #[error("Database query failed: {context}")]
    QueryError {
        /// Which operation failed and why
        context: String,
    },

    /// Schema bootstrap failed
    #[error("Database migration failed: {context}")]
    MigrationError {
        /// Which migration step failed
        context: String,
    },

    /// A JSON column could not be encoded or decoded
    #[error("Serialization failed: {context}")]
    SerializationError {
        /// Column or value that failed
        context: String,
    },

    /// A stored value could not be mapped to its domain type
    #[error("Invalid data in {field}: {reason}")]
    InvalidData {
        /// Column name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Connection string names a backend that is not compiled in
    #[error("Unsupported database backend: {backend}")]
    UnsupportedBackend {
        /// Backend requested by the connection string
        backend: String,
    },
}

/// Result alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

impl From<serde_json::Error> for DatabaseError {
    fn from(error: serde_json::Error) -> Self {
        Self::SerializationError {
            context: error.to_string(),
        }
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::ConnectionError {
                    context: error.to_string(),
                }
            }
            sqlx::Error::ColumnDecode { index, source } => Self::InvalidData {
                field: "column",
                reason: format!("{index}: {source}"),
            },
            other => Self::QueryError {
                context: other.to_string(),
            },
        }
    }
}
