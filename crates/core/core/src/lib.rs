//! # Schemagate Core
//!
//! This crate provides the foundational types for Schemagate: table schema
//! values, the verifier that checks a live schema against an expected one,
//! the error types, and the trait interfaces that schema sources and
//! outcome reporters implement.

pub mod error;
pub mod schema;
pub mod source;
pub mod traits;

// Re-export commonly used items at the crate root
pub use error::{SchemaError, SchemaResult};
pub use schema::{
    verify_report, verify_schemas, FamilySubsetVerifier, SchemaDefinition, SchemaIndex,
    SchemaVerifier, TableDefinition, TableName, TableSchema, VerificationReport,
    DEFAULT_NAMESPACE,
};
pub use source::StaticSchemaSource;
pub use traits::{OutcomeReporter, SchemaSource};
