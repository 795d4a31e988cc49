//! # school-cache
//!
//! Redis layer used for the notification outbox.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Notification outbox**: Attendance and welcome notifications are pushed
//!   onto a Redis list that the mailer drains
//!
//! ## Example
//!
//! ```ignore
//! use school_cache::{RedisNotificationGateway, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig {
//!     url: "redis://127.0.0.1:6379".to_string(),
//!     max_connections: 4,
//! })?;
//! let gateway = RedisNotificationGateway::new(pool);
//! gateway.notify(&notification).await?;
//! ```

pub mod notifications;
pub mod pool;

pub use notifications::{RedisNotificationGateway, NOTIFICATION_QUEUE};
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
