//! PostgreSQL implementation of GuardianRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use school_core::entities::{Guardian, GuardianChanges, NewGuardian};
use school_core::error::DomainError;
use school_core::traits::{GuardianRepository, RecordScope, RepoResult};

use crate::models::GuardianModel;

use super::error::{map_db_error, map_person_conflict};
use super::scope::visible;

const COLUMNS: &str = GuardianModel::COLUMNS;

/// PostgreSQL implementation of GuardianRepository
#[derive(Clone)]
pub struct PgGuardianRepository {
    pool: PgPool,
}

impl PgGuardianRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuardianRepository for PgGuardianRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64, scope: RecordScope) -> RepoResult<Option<Guardian>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM guardians g WHERE g.id = $1 AND {}",
            visible(scope, "g")
        );
        let result = sqlx::query_as::<_, GuardianModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Guardian::from))
    }

    #[instrument(skip(self))]
    async fn find_by_phone_suffix(&self, suffix: &str) -> RepoResult<Vec<Guardian>> {
        let sql = format!(
            r"
            SELECT {COLUMNS} FROM guardians
            WHERE deleted_at IS NULL
              AND RIGHT(regexp_replace(phone, '\D', '', 'g'), 9) = $1
            ORDER BY id
            "
        );
        let rows = sqlx::query_as::<_, GuardianModel>(&sql)
            .bind(suffix)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Guardian::from).collect())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Guardian>> {
        let sql = format!("SELECT {COLUMNS} FROM guardians WHERE deleted_at IS NULL ORDER BY id");
        let rows = sqlx::query_as::<_, GuardianModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Guardian::from).collect())
    }

    #[instrument(skip(self, guardian), fields(phone = %guardian.phone))]
    async fn create(&self, guardian: &NewGuardian) -> RepoResult<Guardian> {
        let sql = format!(
            r"
            INSERT INTO guardians (
                first_name, last_name, other_names, email, phone,
                identification_document_type, identification_document_number,
                identification_document_expiry
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "
        );
        let model = sqlx::query_as::<_, GuardianModel>(&sql)
            .bind(&guardian.first_name)
            .bind(&guardian.last_name)
            .bind(&guardian.other_names)
            .bind(&guardian.email)
            .bind(&guardian.phone)
            .bind(&guardian.identification.document_type)
            .bind(&guardian.identification.document_number)
            .bind(guardian.identification.document_expiry)
            .fetch_one(&self.pool)
            .await
            .map_err(map_person_conflict)?;

        Ok(Guardian::from(model))
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: i64, changes: &GuardianChanges) -> RepoResult<Guardian> {
        let sql = format!(
            r"
            UPDATE guardians
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                other_names = COALESCE($4, other_names),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                identification_document_type = COALESCE($7, identification_document_type),
                identification_document_number = COALESCE($8, identification_document_number),
                identification_document_expiry = COALESCE($9, identification_document_expiry),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {COLUMNS}
            "
        );
        let result = sqlx::query_as::<_, GuardianModel>(&sql)
            .bind(id)
            .bind(&changes.first_name)
            .bind(&changes.last_name)
            .bind(&changes.other_names)
            .bind(&changes.email)
            .bind(&changes.phone)
            .bind(&changes.identification.document_type)
            .bind(&changes.identification.document_number)
            .bind(changes.identification.document_expiry)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_person_conflict)?;

        result
            .map(Guardian::from)
            .ok_or(DomainError::GuardianNotFound)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE guardians
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::GuardianNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn restore(&self, id: i64) -> RepoResult<Guardian> {
        let sql = format!(
            r"
            UPDATE guardians
            SET deleted_at = NULL, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "
        );
        let result = sqlx::query_as::<_, GuardianModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result
            .map(Guardian::from)
            .ok_or(DomainError::GuardianNotFound)
    }
}
