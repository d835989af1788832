//! Webhook transport abstraction.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{WebhookError, WebhookResult};
use crate::response::WebhookResponse;

/// Trait for delivering webhook payloads.
///
/// The transport owns addressing, signing and retries. The notifier only
/// hands it a finished payload.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    /// Delivers one payload.
    async fn deliver(&self, response: &WebhookResponse) -> WebhookResult<()>;
}

#[async_trait]
impl<T: WebhookTransport + ?Sized> WebhookTransport for Arc<T> {
    async fn deliver(&self, response: &WebhookResponse) -> WebhookResult<()> {
        (**self).deliver(response).await
    }
}

/// In-memory transport that records every delivered payload.
///
/// Cloning the transport shares the recorded payloads.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransport {
    delivered: Arc<RwLock<Vec<WebhookResponse>>>,
    failure: Arc<RwLock<Option<String>>>,
}

impl InMemoryTransport {
    /// Creates a new in-memory transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following delivery fail with the given reason.
    pub async fn fail_with(&self, reason: impl Into<String>) {
        *self.failure.write().await = Some(reason.into());
    }

    /// Makes deliveries succeed again.
    pub async fn recover(&self) {
        *self.failure.write().await = None;
    }

    /// Returns all delivered payloads in delivery order.
    pub async fn delivered(&self) -> Vec<WebhookResponse> {
        self.delivered.read().await.clone()
    }

    /// Returns the number of delivered payloads.
    pub async fn len(&self) -> usize {
        self.delivered.read().await.len()
    }

    /// Checks if nothing has been delivered.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Clears all recorded payloads.
    pub async fn clear(&self) {
        self.delivered.write().await.clear();
    }
}

#[async_trait]
impl WebhookTransport for InMemoryTransport {
    async fn deliver(&self, response: &WebhookResponse) -> WebhookResult<()> {
        if let Some(reason) = self.failure.read().await.as_ref() {
            return Err(WebhookError::DeliveryFailed(reason.clone()));
        }

        self.delivered.write().await.push(response.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_transport() {
        let transport = InMemoryTransport::new();
        assert!(transport.is_empty().await);

        transport
            .deliver(&WebhookResponse::new("SUCCESS", "1"))
            .await
            .unwrap();
        transport
            .deliver(&WebhookResponse::new("SCHEMA_MISMATCH", "1"))
            .await
            .unwrap();

        let delivered = transport.delivered().await;
        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[1].result, "SCHEMA_MISMATCH");

        transport.clear().await;
        assert_eq!(transport.len().await, 0);
    }

    #[tokio::test]
    async fn test_failing_transport() {
        let transport = InMemoryTransport::new();
        transport.fail_with("endpoint down").await;

        let err = transport
            .deliver(&WebhookResponse::new("SUCCESS", "1"))
            .await
            .unwrap_err();
        assert!(matches!(err, WebhookError::DeliveryFailed(reason) if reason == "endpoint down"));
        assert!(transport.is_empty().await);

        transport.recover().await;
        transport
            .deliver(&WebhookResponse::new("SUCCESS", "1"))
            .await
            .unwrap();
        assert_eq!(transport.len().await, 1);
    }
}
