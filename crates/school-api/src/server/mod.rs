//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use school_cache::{RedisNotificationGateway, RedisPool};
use school_common::{AppConfig, AppError, JwtService};
use school_core::traits::NotificationGateway;
use school_core::value_objects::{StudentKind, TeacherKind};
use school_db::{
    create_pool, run_migrations, PgAttendanceRepository, PgGuardianRepository, PgStudentRepository,
    PgTeacherRepository, PgUserRepository, PoolConfig,
};
use school_service::{LogNotificationGateway, ServiceContext};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = apply_middleware(
        create_router(),
        &config.api,
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    let redis = match &config.redis {
        Some(redis_config) => {
            let redis = RedisPool::from_config(redis_config).map_err(|e| AppError::Cache(e.to_string()))?;
            info!("Redis notification outbox enabled");
            Some(redis)
        }
        None => {
            info!("REDIS_URL not set, notifications will only be logged");
            None
        }
    };

    let notifier: Arc<dyn NotificationGateway> = match &redis {
        Some(redis) => Arc::new(RedisNotificationGateway::new(redis.clone())),
        None => Arc::new(LogNotificationGateway),
    };

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    let service_context = ServiceContext::builder()
        .student_repo(Arc::new(PgStudentRepository::new(pool.clone())))
        .teacher_repo(Arc::new(PgTeacherRepository::new(pool.clone())))
        .guardian_repo(Arc::new(PgGuardianRepository::new(pool.clone())))
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .student_attendance(Arc::new(PgAttendanceRepository::<StudentKind>::new(pool.clone())))
        .teacher_attendance(Arc::new(PgAttendanceRepository::<TeacherKind>::new(pool.clone())))
        .notifier(notifier)
        .jwt_service(jwt_service)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, pool, redis))
}

/// Run the HTTP server on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read listener address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve(listener, app).await
}
