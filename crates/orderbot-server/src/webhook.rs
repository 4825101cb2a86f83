//! Wire types for the dialogue platform's fulfillment webhook.

use orderbot_core::SessionKey;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    pub query_result: QueryResult,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub intent: IntentRef,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub output_contexts: Vec<OutputContext>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRef {
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputContext {
    pub name: String,
}

impl WebhookRequest {
    pub fn intent_name(&self) -> &str {
        &self.query_result.intent.display_name
    }

    /// Session of the first output context.
    pub fn session(&self) -> SessionKey {
        self.query_result
            .output_contexts
            .first()
            .map(|ctx| SessionKey::from_context_path(&ctx.name))
            .unwrap_or(SessionKey::Unknown)
    }
}

/// Response envelope: `{ "fulfillmentText": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentResponse {
    #[serde(rename = "fulfillmentText")]
    pub fulfillment_text: String,
}

impl FulfillmentResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            fulfillment_text: text.into(),
        }
    }
}
