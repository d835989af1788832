//! # Schemagate Webhooks
//!
//! Webhook notifications for schema validation outcomes:
//! - `WebhookResponse` payloads (`result`, `webhookId`, optional `message`)
//! - A pluggable `WebhookTransport` with an in-memory implementation
//! - `WebhookNotifier`, an `OutcomeReporter` that maps verification
//!   reports to payloads
//!
//! ## Example
//!
//! ```rust,ignore
//! use schemagate_webhooks::{InMemoryTransport, WebhookConfig, WebhookNotifier};
//!
//! let config = WebhookConfig::new().webhook_id("12345");
//! let notifier = WebhookNotifier::with_config(config, InMemoryTransport::new())?;
//!
//! notifier.report_outcome(&report).await?;
//! ```

mod error;
mod notifier;
mod response;
mod transport;

pub use error::{WebhookError, WebhookResult};
pub use notifier::{WebhookConfig, WebhookNotifier};
pub use response::{ValidationResultCode, WebhookResponse};
pub use transport::{InMemoryTransport, WebhookTransport};
