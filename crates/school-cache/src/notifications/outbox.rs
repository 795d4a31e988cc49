//! Redis-backed notification gateway.
//!
//! Notifications are appended to a Redis list; an out-of-process mailer
//! pops them and sends the emails. Entries stay queued while no mailer is
//! connected.

use async_trait::async_trait;
use school_core::events::Notification;
use school_core::traits::{NotificationGateway, RepoResult};
use school_core::DomainError;

use crate::pool::RedisPool;

/// Default list key for pending notifications
pub const NOTIFICATION_QUEUE: &str = "school:notifications:outbox";

/// Queues notifications on a Redis list
#[derive(Debug, Clone)]
pub struct RedisNotificationGateway {
    pool: RedisPool,
    queue: String,
}

impl RedisNotificationGateway {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self::with_queue(pool, NOTIFICATION_QUEUE)
    }

    #[must_use]
    pub fn with_queue(pool: RedisPool, queue: impl Into<String>) -> Self {
        Self {
            pool,
            queue: queue.into(),
        }
    }

    #[must_use]
    pub fn queue(&self) -> &str {
        &self.queue
    }

    /// Number of notifications waiting for the mailer
    pub async fn pending(&self) -> RepoResult<u64> {
        self.pool
            .list_len(&self.queue)
            .await
            .map_err(|e| DomainError::CacheError(e.to_string()))
    }

    /// Take the oldest queued notification, as the mailer does
    pub async fn next_pending(&self) -> RepoResult<Option<Notification>> {
        self.pool
            .pop_json(&self.queue)
            .await
            .map_err(|e| DomainError::CacheError(e.to_string()))
    }
}

#[async_trait]
impl NotificationGateway for RedisNotificationGateway {
    async fn notify(&self, notification: &Notification) -> RepoResult<()> {
        let depth = self
            .pool
            .push_json(&self.queue, notification)
            .await
            .map_err(|e| DomainError::NotificationError(e.to_string()))?;

        tracing::debug!(
            queue = %self.queue,
            notification_id = %notification.id,
            kind = ?notification.kind,
            recipients = notification.recipients.len(),
            depth,
            "Queued notification"
        );

        Ok(())
    }
}
