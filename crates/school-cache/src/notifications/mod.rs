//! Notification delivery through Redis

mod outbox;

pub use outbox::{RedisNotificationGateway, NOTIFICATION_QUEUE};
