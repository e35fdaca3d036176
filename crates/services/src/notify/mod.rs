use std::sync::Arc;

use async_trait::async_trait;
use bson::{DateTime, oid::ObjectId};
use koinonia_config::PushSettings;
use koinonia_db::models::{DeviceToken, Notification, NotificationKind};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::dao::base::{DaoError, DaoResult};
use crate::push::{PushMessage, PushTransport};

pub mod catalog;
pub mod reconciler;
pub mod translate;

use self::reconciler::FailureReconciler;

/// Normalized event, produced by the translation layer. Ids are `ObjectId`,
/// so the "both identities present" invariant holds by construction.
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    pub recipient_id: ObjectId,
    pub actor_id: ObjectId,
    pub actor_name: String,
    pub actor_photo_url: Option<String>,
    pub kind: NotificationKind,
    pub entity_id: ObjectId,
    pub entity_path: String,
}

/// Write seam for the persisted notification record.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn create(&self, record: &Notification) -> DaoResult<ObjectId>;
}

/// Read/cleanup seam for device registrations.
#[async_trait]
pub trait DeviceTokenStore: Send + Sync {
    async fn tokens_for_owner(&self, owner_id: ObjectId) -> DaoResult<Vec<DeviceToken>>;
    async fn delete_by_token(&self, token: &str) -> DaoResult<u64>;
}

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The in-app record could not be written. This is the one fatal path:
    /// without an identified record nothing downstream may proceed.
    #[error("Notification record write failed: {0}")]
    Record(#[from] DaoError),
}

/// What one dispatch did. `record_id` is `None` only for a suppressed
/// self-notification.
#[derive(Debug, Clone, Default)]
pub struct DispatchSummary {
    pub record_id: Option<ObjectId>,
    pub tokens: usize,
    pub accepted: usize,
    pub removed_tokens: u64,
    pub suppressed: bool,
}

impl DispatchSummary {
    fn suppressed() -> Self {
        Self {
            suppressed: true,
            ..Self::default()
        }
    }
}

/// Orchestrates one notification: guard, record write, token resolution,
/// multicast, reconciliation. All collaborators are injected; the record
/// write is the only step whose failure propagates.
pub struct NotificationDispatcher {
    records: Arc<dyn NotificationStore>,
    tokens: Arc<dyn DeviceTokenStore>,
    transport: Arc<dyn PushTransport>,
    reconciler: FailureReconciler,
    push: PushSettings,
}

impl NotificationDispatcher {
    pub fn new(
        records: Arc<dyn NotificationStore>,
        tokens: Arc<dyn DeviceTokenStore>,
        transport: Arc<dyn PushTransport>,
        push: PushSettings,
    ) -> Self {
        let reconciler = FailureReconciler::new(Arc::clone(&tokens));
        Self {
            records,
            tokens,
            transport,
            reconciler,
            push,
        }
    }

    pub async fn dispatch(
        &self,
        request: NotificationRequest,
    ) -> Result<DispatchSummary, DispatchError> {
        if request.recipient_id == request.actor_id {
            debug!(actor = %request.actor_id, "Self-notification suppressed");
            return Ok(DispatchSummary::suppressed());
        }

        // The record is the durable guarantee. It is written before any
        // delivery work and is never rolled back by a failed push.
        let record = Notification {
            id: None,
            recipient_id: request.recipient_id,
            actor_id: request.actor_id,
            actor_name: request.actor_name.clone(),
            actor_photo_url: request.actor_photo_url.clone(),
            kind: request.kind,
            entity_id: request.entity_id,
            entity_path: request.entity_path.clone(),
            is_read: false,
            created_at: DateTime::now(),
        };
        let record_id = self.records.create(&record).await?;

        let registrations = match self.tokens.tokens_for_owner(request.recipient_id).await {
            Ok(registrations) => registrations,
            Err(err) => {
                warn!(
                    recipient = %request.recipient_id,
                    error = %err,
                    "Token lookup failed, delivering record-only"
                );
                Vec::new()
            }
        };

        if registrations.is_empty() {
            debug!(recipient = %request.recipient_id, "No registered devices");
            return Ok(DispatchSummary {
                record_id: Some(record_id),
                ..DispatchSummary::default()
            });
        }

        let tokens: Vec<String> = registrations.iter().map(|r| r.token.clone()).collect();
        let message = self.render(&request);

        let outcomes = match self.transport.send_to_tokens(&tokens, &message).await {
            Ok(outcomes) => outcomes,
            Err(err) => {
                // Best-effort: no retry here, redelivery belongs upstream.
                error!(
                    recipient = %request.recipient_id,
                    error = %err,
                    "Multicast failed, record stays"
                );
                return Ok(DispatchSummary {
                    record_id: Some(record_id),
                    tokens: tokens.len(),
                    ..DispatchSummary::default()
                });
            }
        };

        let accepted = outcomes.iter().filter(|o| o.accepted()).count();
        let removed_tokens = self.reconciler.reconcile(&outcomes).await;

        info!(
            record = %record_id,
            tokens = tokens.len(),
            accepted,
            removed = removed_tokens,
            "Notification dispatched"
        );

        Ok(DispatchSummary {
            record_id: Some(record_id),
            tokens: tokens.len(),
            accepted,
            removed_tokens,
            suppressed: false,
        })
    }

    fn render(&self, request: &NotificationRequest) -> PushMessage {
        PushMessage {
            title: self.push.title.clone(),
            body: format!(
                "{} {}",
                request.actor_name,
                catalog::action_phrase(request.kind)
            ),
            link: format!(
                "{}{}",
                self.push.link_base.trim_end_matches('/'),
                request.entity_path
            ),
            icon: request
                .actor_photo_url
                .clone()
                .unwrap_or_else(|| self.push.default_icon.clone()),
        }
    }
}
