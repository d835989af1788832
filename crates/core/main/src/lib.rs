//! # Schemagate
//!
//! A pre-flight gate that checks whether a store's live tables and column
//! families satisfy the schema a service was packaged with.
//!
//! Extra tables and extra column families in the store are fine; a missing
//! table or a missing column family fails the check.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use schemagate::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), SchemaError> {
//!     let expected = StaticSchemaSource::from_path("packaged", "schema/tables.json")?;
//!
//!     let gate = SchemaGate::builder()
//!         .expected(expected)
//!         .actual(live_catalog)
//!         .reporter(WebhookNotifier::new(transport))
//!         .build()?;
//!
//!     // Fails with SchemaError::Incompatible when tables are missing
//!     let report = gate.run().await?;
//!
//!     Ok(())
//! }
//! ```

mod gate;

// Re-export core types
pub use schemagate_core::*;

// Re-export the webhook notifier
pub use schemagate_webhooks as webhooks;

pub use gate::{SchemaGate, SchemaGateBuilder};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::GateConfig;
    pub use crate::gate::{SchemaGate, SchemaGateBuilder};
    pub use schemagate_core::error::{SchemaError, SchemaResult};
    pub use schemagate_core::schema::{
        SchemaDefinition, TableName, TableSchema, VerificationReport,
    };
    pub use schemagate_core::source::StaticSchemaSource;
    pub use schemagate_core::traits::{OutcomeReporter, SchemaSource};
    pub use schemagate_webhooks::{
        InMemoryTransport, WebhookConfig, WebhookNotifier, WebhookResponse, WebhookTransport,
    };
}

/// Configuration for the schema gate.
pub mod config {
    use schemagate_core::error::{SchemaError, SchemaResult};
    use serde::{Deserialize, Serialize};

    /// Main configuration struct for the schema gate.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GateConfig {
        /// Time allowed for each schema source to answer (default: 30s)
        pub source_timeout_ms: u64,
        /// Whether an incompatible schema makes the gate fail (default: true)
        pub fail_on_mismatch: bool,
    }

    impl Default for GateConfig {
        fn default() -> Self {
            Self {
                source_timeout_ms: 30_000,
                fail_on_mismatch: true,
            }
        }
    }

    impl GateConfig {
        /// Creates a new configuration.
        pub fn new() -> Self {
            Self::default()
        }

        /// Sets the per-source timeout.
        pub fn source_timeout_ms(mut self, ms: u64) -> Self {
            self.source_timeout_ms = ms;
            self
        }

        /// Sets whether a mismatch fails the gate.
        pub fn fail_on_mismatch(mut self, fail: bool) -> Self {
            self.fail_on_mismatch = fail;
            self
        }

        /// Parses a configuration from JSON text. Missing keys keep their
        /// defaults.
        pub fn from_json(json: &str) -> SchemaResult<Self> {
            let config: Self = serde_json::from_str(json)?;
            config.validate()?;
            Ok(config)
        }

        /// Checks the configuration.
        pub fn validate(&self) -> SchemaResult<()> {
            if self.source_timeout_ms == 0 {
                return Err(SchemaError::config("source_timeout_ms must be greater than 0"));
            }
            Ok(())
        }
    }

}
