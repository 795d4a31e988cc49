//! Notification dispatch
//!
//! Delivery runs on a spawned task. Gateway errors are logged and never
//! reach the caller.

use std::sync::Arc;

use async_trait::async_trait;
use school_core::events::Notification;
use school_core::traits::{NotificationGateway, RepoResult};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Hand a notification to the gateway without waiting for delivery.
///
/// Returns `None` when there is nobody to notify.
pub fn dispatch(gateway: Arc<dyn NotificationGateway>, notification: Notification) -> Option<JoinHandle<()>> {
    if !notification.has_recipients() {
        debug!(
            kind = ?notification.kind,
            subject_code = %notification.subject_code,
            "No recipients, notification skipped"
        );
        return None;
    }

    Some(tokio::spawn(async move {
        if let Err(e) = gateway.notify(&notification).await {
            warn!(
                error = %e,
                notification_id = %notification.id,
                kind = ?notification.kind,
                subject_code = %notification.subject_code,
                "Notification delivery failed"
            );
        }
    }))
}

/// Gateway that only records notifications in the log.
///
/// Used when no Redis outbox is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotificationGateway;

#[async_trait]
impl NotificationGateway for LogNotificationGateway {
    async fn notify(&self, notification: &Notification) -> RepoResult<()> {
        let recipients: Vec<&str> = notification.recipients.iter().map(|r| r.email.as_str()).collect();

        info!(
            notification_id = %notification.id,
            subject = notification.kind.subject_line(),
            subject_type = %notification.subject_type,
            subject_code = %notification.subject_code,
            subject_name = %notification.subject_name,
            at = %notification.display_time,
            ?recipients,
            attachment = notification.attachment.as_ref().map(|a| a.filename.as_str()),
            "Notification"
        );

        Ok(())
    }
}
