//! Notification port

use async_trait::async_trait;

use crate::events::Notification;
use crate::traits::RepoResult;

/// Delivers notifications to their recipients.
///
/// Implementations may queue instead of sending; callers treat a returned
/// error as a delivery failure to log, never as a failure of the action
/// that produced the notification.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn notify(&self, notification: &Notification) -> RepoResult<()>;
}
