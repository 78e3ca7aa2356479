//! Reqwest-backed implementation of the push-gateway seam.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use notifly_api::{PushGateway, PushMessage, PushReceipt};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Push-provider client used by the production binary.
#[derive(Debug, Clone)]
pub struct HttpPushGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProviderRequest<'a> {
    title: &'a str,
    body: &'a str,
    recipients: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    deliver_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderResponse {
    message_id: String,
    accepted: u32,
}

impl HttpPushGateway {
    /// Client for the provider at `endpoint`, authenticated with `api_key`
    /// when one is configured.
    #[must_use]
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl PushGateway for HttpPushGateway {
    async fn send(&self, message: &PushMessage) -> anyhow::Result<PushReceipt> {
        let payload = ProviderRequest {
            title: &message.title,
            body: &message.body,
            recipients: &message.recipients,
            deliver_at: message.deliver_at,
        };
        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await?.error_for_status()?;
        let body: ProviderResponse = response.json().await?;
        debug!(message_id = %body.message_id, accepted = body.accepted, "provider accepted push");
        Ok(PushReceipt {
            message_id: body.message_id,
            accepted: body.accepted,
        })
    }
}
