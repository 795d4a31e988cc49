//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use school_core::entities::{NewUser, User, UserChanges};
use school_core::error::DomainError;
use school_core::traits::{RecordScope, RepoResult, UserRepository};

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation};
use super::scope::visible;

const COLUMNS: &str = UserModel::COLUMNS;

fn email_taken(_constraint: Option<&str>) -> DomainError {
    DomainError::EmailAlreadyExists
}

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64, scope: RecordScope) -> RepoResult<Option<User>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM users u WHERE u.id = $1 AND {}",
            visible(scope, "u")
        );
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str, scope: RecordScope) -> RepoResult<Option<User>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM users u WHERE u.email = $1 AND {}",
            visible(scope, "u")
        );
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<User>> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY id");
        let rows = sqlx::query_as::<_, UserModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let sql = format!(
            r"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {COLUMNS}
            "
        );
        let model = sqlx::query_as::<_, UserModel>(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, email_taken))?;

        Ok(User::from(model))
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: i64, changes: &UserChanges) -> RepoResult<User> {
        let sql = format!(
            r"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {COLUMNS}
            "
        );
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.email)
            .bind(&changes.password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, email_taken))?;

        result.map(User::from).ok_or(DomainError::UserNotFound)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn restore(&self, id: i64) -> RepoResult<User> {
        let sql = format!(
            r"
            UPDATE users
            SET deleted_at = NULL, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "
        );
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(User::from).ok_or(DomainError::UserNotFound)
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, email: &str) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM users WHERE email = $1 AND deleted_at IS NULL
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }
}
