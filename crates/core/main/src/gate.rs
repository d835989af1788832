//! The pre-flight schema gate.

use std::time::Duration;

use schemagate_core::error::{SchemaError, SchemaResult};
use schemagate_core::schema::{
    FamilySubsetVerifier, SchemaVerifier, TableSchema, VerificationReport,
};
use schemagate_core::traits::{OutcomeReporter, SchemaSource};

use crate::config::GateConfig;

/// Checks a live schema against an expected schema before a service
/// starts using the store.
///
/// The gate loads both schema lists, runs the verifier, logs every
/// mismatch, hands the outcome to an optional reporter, and fails with
/// [`SchemaError::Incompatible`] when configured to abort on mismatch.
pub struct SchemaGate {
    expected: Box<dyn SchemaSource>,
    actual: Box<dyn SchemaSource>,
    verifier: Box<dyn SchemaVerifier>,
    reporter: Option<Box<dyn OutcomeReporter>>,
    config: GateConfig,
}

impl SchemaGate {
    /// Returns a builder for a gate.
    pub fn builder() -> SchemaGateBuilder {
        SchemaGateBuilder::default()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Runs one verification.
    pub async fn run(&self) -> SchemaResult<VerificationReport> {
        let (expected, actual) = tokio::join!(
            self.load(&*self.expected),
            self.load(&*self.actual)
        );
        let expected = expected?;
        let actual = actual?;

        let report = self
            .verifier
            .verify_report(expected.as_deref(), actual.as_deref());
        log_report(&report);

        if let Some(reporter) = &self.reporter {
            if let Err(e) = reporter.report_outcome(&report).await {
                tracing::warn!(error = %e, "Failed to report validation outcome");
            }
        }

        if !report.is_compatible() && self.config.fail_on_mismatch {
            return Err(SchemaError::Incompatible {
                missing_tables: report.missing_tables.len(),
                missing_families: report.missing_family_count(),
            });
        }

        Ok(report)
    }

    async fn load(&self, source: &dyn SchemaSource) -> SchemaResult<Option<Vec<TableSchema>>> {
        let timeout_ms = self.config.source_timeout_ms;
        tracing::debug!(source = source.name(), timeout_ms, "Loading schemas");

        match tokio::time::timeout(Duration::from_millis(timeout_ms), source.load_schemas()).await
        {
            Ok(result) => result,
            Err(_) => Err(SchemaError::Timeout {
                source_name: source.name().to_string(),
                timeout_ms,
            }),
        }
    }
}

fn log_report(report: &VerificationReport) {
    for table in &report.duplicate_actual_tables {
        tracing::warn!(
            table = %table,
            "Table listed more than once in actual schema, last entry used"
        );
    }

    if report.is_compatible() {
        tracing::info!(
            expected_tables = report.expected_tables,
            actual_tables = report.actual_tables,
            "Schema verification passed"
        );
        return;
    }

    for table in &report.missing_tables {
        tracing::warn!(table = %table, "Expected table missing");
    }
    for (table, families) in &report.missing_families {
        for family in families {
            tracing::warn!(table = %table, family = %family, "Expected column family missing");
        }
    }
    tracing::warn!(
        expected_tables = report.expected_tables,
        actual_tables = report.actual_tables,
        "{}",
        report.summary()
    );
}

/// Builder for [`SchemaGate`].
#[derive(Default)]
pub struct SchemaGateBuilder {
    expected: Option<Box<dyn SchemaSource>>,
    actual: Option<Box<dyn SchemaSource>>,
    verifier: Option<Box<dyn SchemaVerifier>>,
    reporter: Option<Box<dyn OutcomeReporter>>,
    config: GateConfig,
}

impl SchemaGateBuilder {
    /// Sets the source of the expected schema.
    pub fn expected(mut self, source: impl SchemaSource + 'static) -> Self {
        self.expected = Some(Box::new(source));
        self
    }

    /// Sets the source of the actual schema.
    pub fn actual(mut self, source: impl SchemaSource + 'static) -> Self {
        self.actual = Some(Box::new(source));
        self
    }

    /// Replaces the default [`FamilySubsetVerifier`].
    pub fn verifier(mut self, verifier: impl SchemaVerifier + 'static) -> Self {
        self.verifier = Some(Box::new(verifier));
        self
    }

    /// Sets the reporter that receives every outcome.
    pub fn reporter(mut self, reporter: impl OutcomeReporter + 'static) -> Self {
        self.reporter = Some(Box::new(reporter));
        self
    }

    /// Sets the configuration.
    pub fn config(mut self, config: GateConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the gate.
    pub fn build(self) -> SchemaResult<SchemaGate> {
        self.config.validate()?;

        let expected = self
            .expected
            .ok_or_else(|| SchemaError::config("expected schema source is required"))?;
        let actual = self
            .actual
            .ok_or_else(|| SchemaError::config("actual schema source is required"))?;

        Ok(SchemaGate {
            expected,
            actual,
            verifier: self
                .verifier
                .unwrap_or_else(|| Box::new(FamilySubsetVerifier::new())),
            reporter: self.reporter,
            config: self.config,
        })
    }
}
