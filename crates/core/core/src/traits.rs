//! Core traits for Schemagate.
//!
//! This module defines the seams between the verifier and its
//! collaborators: where schema lists come from and where validation
//! outcomes go.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::SchemaResult;
use crate::schema::{TableSchema, VerificationReport};

/// A provider of table schemas.
///
/// Expected schemas usually come from a packaged definition, actual schemas
/// from the live metadata of a store. Returning `Ok(None)` means the source
/// has no list to offer, which the verifier treats as an empty list.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Returns a short name used in logs and errors.
    fn name(&self) -> &str;

    /// Loads the current schema list.
    async fn load_schemas(&self) -> SchemaResult<Option<Vec<TableSchema>>>;
}

#[async_trait]
impl<S: SchemaSource + ?Sized> SchemaSource for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn load_schemas(&self) -> SchemaResult<Option<Vec<TableSchema>>> {
        (**self).load_schemas().await
    }
}

/// A consumer of validation outcomes.
///
/// Implementations publish the result somewhere an operator will see it,
/// such as a webhook. Compatibility is read from
/// [`VerificationReport::is_compatible`].
#[async_trait]
pub trait OutcomeReporter: Send + Sync {
    /// Reports the outcome of one verification.
    async fn report_outcome(&self, report: &VerificationReport) -> SchemaResult<()>;
}

#[async_trait]
impl<R: OutcomeReporter + ?Sized> OutcomeReporter for Arc<R> {
    async fn report_outcome(&self, report: &VerificationReport) -> SchemaResult<()> {
        (**self).report_outcome(report).await
    }
}
