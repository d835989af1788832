//! Webhook error types.

use schemagate_core::SchemaError;
use thiserror::Error;

/// Result type for webhook operations.
pub type WebhookResult<T> = Result<T, WebhookError>;

/// Error type for webhook operations.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Invalid payload.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Delivery failed.
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for WebhookError {
    fn from(err: serde_json::Error) -> Self {
        WebhookError::InvalidPayload(err.to_string())
    }
}

impl From<WebhookError> for SchemaError {
    fn from(err: WebhookError) -> Self {
        SchemaError::notification(err.to_string())
    }
}
