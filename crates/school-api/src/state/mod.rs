//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! configuration, and the connection pools the readiness probe checks.

use std::sync::Arc;

use school_cache::RedisPool;
use school_common::AppConfig;
use school_db::PgPool;
use school_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
    pool: PgPool,
    redis: Option<RedisPool>,
}

impl AppState {
    pub fn new(service_context: ServiceContext, config: AppConfig, pool: PgPool, redis: Option<RedisPool>) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            pool,
            redis,
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Redis pool, when the notification outbox is enabled
    pub fn redis(&self) -> Option<&RedisPool> {
        self.redis.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("env", &self.config.app.env)
            .field("redis", &self.redis.is_some())
            .finish_non_exhaustive()
    }
}
