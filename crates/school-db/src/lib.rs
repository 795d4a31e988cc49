//! # school-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `school-core`. It handles:
//!
//! - Connection pool management and startup migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations, including the atomic attendance statements
//!
//! ## Usage
//!
//! ```rust,ignore
//! use school_db::{create_pool, run_migrations, PgStudentRepository, PoolConfig};
//!
//! async fn example(config: &school_common::DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::from(config)).await?;
//!     run_migrations(&pool, &config.migrations_dir).await?;
//!     let students = PgStudentRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    AttendanceTable, PgAttendanceRepository, PgGuardianRepository, PgStudentRepository,
    PgTeacherRepository, PgUserRepository,
};
