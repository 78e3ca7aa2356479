//! Outbound push-gateway seam.
//!
//! # Design
//! - Handlers depend on the trait, never on a concrete HTTP client, so the
//!   send path stays testable without network access.
//! - A failed send is surfaced to the caller and never retried here; the
//!   provider owns redelivery semantics.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Message handed to the push provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushMessage {
    /// Push title.
    pub title: String,
    /// Push body.
    pub body: String,
    /// Device tokens or topics; empty means broadcast.
    pub recipients: Vec<String>,
    /// UTC instant the provider should deliver at, when scheduled.
    pub deliver_at: Option<DateTime<Utc>>,
}

/// Acknowledgement returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushReceipt {
    /// Provider-assigned message identifier.
    pub message_id: String,
    /// Number of recipients the provider accepted.
    pub accepted: u32,
}

/// Client for the external push-notification provider.
#[async_trait]
pub trait PushGateway: Send + Sync {
    /// Submit a message for delivery.
    async fn send(&self, message: &PushMessage) -> anyhow::Result<PushReceipt>;
}

/// Gateway that accepts everything without touching the network.
///
/// Used by tests and by deployments that have no provider configured yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPushGateway;

#[async_trait]
impl PushGateway for NoopPushGateway {
    async fn send(&self, message: &PushMessage) -> anyhow::Result<PushReceipt> {
        let accepted = u32::try_from(message.recipients.len().max(1)).unwrap_or(u32::MAX);
        Ok(PushReceipt {
            message_id: uuid::Uuid::new_v4().to_string(),
            accepted,
        })
    }
}
