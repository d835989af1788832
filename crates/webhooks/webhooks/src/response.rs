//! Webhook payload describing a validation outcome.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result code carried in the `result` field of a [`WebhookResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationResultCode {
    /// The live schema satisfies the expected schema.
    Success,
    /// Expected tables or column families are missing.
    SchemaMismatch,
}

impl ValidationResultCode {
    /// Returns the wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::SchemaMismatch => "SCHEMA_MISMATCH",
        }
    }
}

impl fmt::Display for ValidationResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body posted to a webhook after validation.
///
/// `message` is left out of the serialized form entirely when it is not
/// set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResponse {
    /// Result code, `SUCCESS` or a failure code.
    pub result: String,
    /// Correlation identifier of the webhook.
    #[serde(rename = "webhookId")]
    pub webhook_id: String,
    /// Optional detail for operators.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

impl WebhookResponse {
    /// Creates a response without a message.
    pub fn new(result: impl Into<String>, webhook_id: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            webhook_id: webhook_id.into(),
            message: None,
        }
    }

    /// Creates a response from a result code.
    pub fn from_code(code: ValidationResultCode, webhook_id: impl Into<String>) -> Self {
        Self::new(code.as_str(), webhook_id)
    }

    /// Sets the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns true if the result is `SUCCESS`.
    pub fn is_success(&self) -> bool {
        self.result == ValidationResultCode::Success.as_str()
    }

    /// Serializes the response to JSON text.
    pub fn to_json(&self) -> crate::error::WebhookResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
