//! Error types for Schemagate.
//!
//! This module defines the `SchemaError` enum which represents the
//! operational faults that can occur around schema verification: loading
//! definitions, reading live catalogs, and reporting outcomes.
//!
//! A schema mismatch on its own is not an error. The verifier answers
//! `false` and only the gate turns that answer into
//! [`SchemaError::Incompatible`] when it is configured to abort.

use thiserror::Error;

/// The main error type for Schemagate operations.
#[derive(Debug, Error)]
pub enum SchemaError {
    // ==================== Definition Errors ====================
    /// A packaged schema definition could not be interpreted.
    #[error("Invalid schema definition: {message}")]
    InvalidDefinition { message: String },

    /// A schema definition declares the same table more than once.
    #[error("Duplicate table in schema definition: {table}")]
    DuplicateTable { table: String },

    // ==================== Catalog Errors ====================
    /// A table already exists in the catalog.
    #[error("Table already exists: {table}")]
    TableExists { table: String },

    /// A table does not exist in the catalog.
    #[error("Table not found: {table}")]
    TableNotFound { table: String },

    /// A schema source could not produce its schema list.
    #[error("Schema source '{source_name}' unavailable: {message}")]
    SourceUnavailable {
        source_name: String,
        message: String,
    },

    /// A schema source did not answer in time.
    #[error("Schema source '{source_name}' timed out after {timeout_ms}ms")]
    Timeout { source_name: String, timeout_ms: u64 },

    // ==================== Verification Errors ====================
    /// The live schema does not satisfy the expected schema.
    #[error(
        "Schema incompatible: {missing_tables} missing table(s), {missing_families} missing column family(ies)"
    )]
    Incompatible {
        missing_tables: usize,
        missing_families: usize,
    },

    // ==================== Reporting Errors ====================
    /// The validation outcome could not be delivered.
    #[error("Notification error: {message}")]
    Notification { message: String },

    // ==================== Configuration Errors ====================
    /// The configuration is invalid.
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {message}")]
    SerializationError { message: String },
}

impl SchemaError {
    /// Creates a new invalid definition error.
    pub fn invalid_definition(message: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            message: message.into(),
        }
    }

    /// Creates a new source unavailable error.
    pub fn source_unavailable(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Creates a new notification error.
    pub fn notification(message: impl Into<String>) -> Self {
        Self::Notification {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// Returns true if this error reports a schema mismatch rather than
    /// an operational fault.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Incompatible { .. })
    }
}

/// A Result type alias using SchemaError.
pub type SchemaResult<T> = Result<T, SchemaError>;

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            message: err.to_string(),
        }
    }
}
