//! Validation notifier - turns verification reports into webhook payloads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use schemagate_core::error::SchemaResult;
use schemagate_core::schema::VerificationReport;
use schemagate_core::traits::OutcomeReporter;

use crate::error::{WebhookError, WebhookResult};
use crate::response::{ValidationResultCode, WebhookResponse};
use crate::transport::WebhookTransport;

/// Webhook notifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Correlation identifier sent as `webhookId`.
    pub webhook_id: String,
    /// Whether successful validations are reported too.
    pub notify_on_success: bool,
    /// Whether failed validations carry a `message` with the mismatch
    /// summary.
    pub include_message: bool,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            webhook_id: uuid::Uuid::new_v4().to_string(),
            notify_on_success: true,
            include_message: true,
        }
    }
}

impl WebhookConfig {
    /// Creates a new configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the webhook identifier.
    pub fn webhook_id(mut self, id: impl Into<String>) -> Self {
        self.webhook_id = id.into();
        self
    }

    /// Sets whether successful validations are reported.
    pub fn notify_on_success(mut self, notify: bool) -> Self {
        self.notify_on_success = notify;
        self
    }

    /// Sets whether failure messages are included.
    pub fn include_message(mut self, include: bool) -> Self {
        self.include_message = include;
        self
    }

    /// Checks the configuration.
    pub fn validate(&self) -> WebhookResult<()> {
        if self.webhook_id.trim().is_empty() {
            return Err(WebhookError::ConfigError(
                "webhook_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reports validation outcomes through a [`WebhookTransport`].
pub struct WebhookNotifier<T: WebhookTransport> {
    config: WebhookConfig,
    transport: T,
}

impl<T: WebhookTransport> WebhookNotifier<T> {
    /// Creates a notifier with the default configuration.
    pub fn new(transport: T) -> Self {
        Self {
            config: WebhookConfig::default(),
            transport,
        }
    }

    /// Creates a notifier with a custom configuration.
    pub fn with_config(config: WebhookConfig, transport: T) -> WebhookResult<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds the payload for a report.
    pub fn build_response(&self, report: &VerificationReport) -> WebhookResponse {
        if report.is_compatible() {
            return WebhookResponse::from_code(
                ValidationResultCode::Success,
                &self.config.webhook_id,
            );
        }

        let response = WebhookResponse::from_code(
            ValidationResultCode::SchemaMismatch,
            &self.config.webhook_id,
        );
        if self.config.include_message {
            response.with_message(report.summary())
        } else {
            response
        }
    }

    /// Builds and delivers the payload for a report. Returns `None` when
    /// the configuration suppresses the notification.
    pub async fn notify(
        &self,
        report: &VerificationReport,
    ) -> WebhookResult<Option<WebhookResponse>> {
        if report.is_compatible() && !self.config.notify_on_success {
            tracing::debug!(webhook_id = %self.config.webhook_id, "Skipping success notification");
            return Ok(None);
        }

        let response = self.build_response(report);
        self.transport.deliver(&response).await?;
        tracing::info!(
            webhook_id = %response.webhook_id,
            result = %response.result,
            "Delivered validation notification"
        );
        Ok(Some(response))
    }
}

#[async_trait]
impl<T: WebhookTransport> OutcomeReporter for WebhookNotifier<T> {
    async fn report_outcome(&self, report: &VerificationReport) -> SchemaResult<()> {
        self.notify(report).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::InMemoryTransport;
    use schemagate_core::{verify_report, SchemaError, TableSchema};

    fn failing_report() -> VerificationReport {
        let expected = vec![TableSchema::new("traces").with_family("S")];
        verify_report(Some(&expected), None)
    }

    fn passing_report() -> VerificationReport {
        verify_report(None, None)
    }

    #[tokio::test]
    async fn test_success_payload_has_no_message() {
        let config = WebhookConfig::new().webhook_id("12345");
        let notifier = WebhookNotifier::with_config(config, InMemoryTransport::new()).unwrap();

        notifier.report_outcome(&passing_report()).await.unwrap();

        let delivered = notifier.transport().delivered().await;
        assert_eq!(delivered, vec![WebhookResponse::new("SUCCESS", "12345")]);
        let json = serde_json::to_value(&delivered[0]).unwrap();
        assert!(json.get("message").is_none());
    }

    #[tokio::test]
    async fn test_mismatch_payload_carries_summary() {
        let config = WebhookConfig::new().webhook_id("w1");
        let notifier = WebhookNotifier::with_config(config, InMemoryTransport::new()).unwrap();

        notifier.report_outcome(&failing_report()).await.unwrap();

        let delivered = notifier.transport().delivered().await;
        assert_eq!(delivered[0].result, "SCHEMA_MISMATCH");
        assert_eq!(
            delivered[0].message.as_deref(),
            Some("schema incompatible: missing tables [traces]")
        );
    }

    #[test]
    fn test_message_can_be_suppressed() {
        let config = WebhookConfig::new().include_message(false);
        let notifier = WebhookNotifier::with_config(config, InMemoryTransport::new()).unwrap();

        let response = notifier.build_response(&failing_report());
        assert!(response.message.is_none());
        assert_eq!(response.webhook_id, notifier.config().webhook_id);
    }

    #[tokio::test]
    async fn test_success_notification_can_be_skipped() {
        let config = WebhookConfig::new().notify_on_success(false);
        let notifier = WebhookNotifier::with_config(config, InMemoryTransport::new()).unwrap();

        assert!(notifier.notify(&passing_report()).await.unwrap().is_none());
        assert!(notifier.notify(&failing_report()).await.unwrap().is_some());
        assert_eq!(notifier.transport().len().await, 1);
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_notification_error() {
        let transport = InMemoryTransport::new();
        transport.fail_with("503").await;
        let notifier = WebhookNotifier::new(transport);

        let err = notifier.report_outcome(&passing_report()).await.unwrap_err();
        assert!(matches!(err, SchemaError::Notification { .. }));
    }

    #[test]
    fn test_empty_webhook_id_rejected() {
        let config = WebhookConfig::new().webhook_id("  ");
        assert!(matches!(
            WebhookNotifier::with_config(config, InMemoryTransport::new()),
            Err(WebhookError::ConfigError(_))
        ));
    }

    #[test]
    fn test_default_webhook_ids_are_unique() {
        assert_ne!(
            WebhookConfig::default().webhook_id,
            WebhookConfig::default().webhook_id
        );
    }
}
