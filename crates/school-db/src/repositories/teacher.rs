//! PostgreSQL implementation of TeacherRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use school_core::entities::{NewTeacher, Teacher, TeacherChanges};
use school_core::error::DomainError;
use school_core::traits::{RecordScope, RepoResult, TeacherRepository};
use school_core::value_objects::SubjectType;

use crate::models::TeacherModel;

use super::error::{map_db_error, map_person_conflict};
use super::scope::visible;

const COLUMNS: &str = TeacherModel::COLUMNS;

fn teacher_not_found() -> DomainError {
    DomainError::SubjectNotFound(SubjectType::Teacher)
}

/// PostgreSQL implementation of TeacherRepository
#[derive(Clone)]
pub struct PgTeacherRepository {
    pool: PgPool,
}

impl PgTeacherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeacherRepository for PgTeacherRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64, scope: RecordScope) -> RepoResult<Option<Teacher>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM teachers t WHERE t.id = $1 AND {}",
            visible(scope, "t")
        );
        let result = sqlx::query_as::<_, TeacherModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Teacher::from))
    }

    #[instrument(skip(self))]
    async fn find_by_code(&self, code: &str, scope: RecordScope) -> RepoResult<Option<Teacher>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM teachers t WHERE t.teacher_code = $1 AND {}",
            visible(scope, "t")
        );
        let result = sqlx::query_as::<_, TeacherModel>(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Teacher::from))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_many(&self, ids: &[i64], scope: RecordScope) -> RepoResult<Vec<Teacher>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {COLUMNS} FROM teachers t WHERE t.id = ANY($1) AND {}",
            visible(scope, "t")
        );
        let rows = sqlx::query_as::<_, TeacherModel>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Teacher::from).collect())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Teacher>> {
        let sql = format!("SELECT {COLUMNS} FROM teachers WHERE deleted_at IS NULL ORDER BY id");
        let rows = sqlx::query_as::<_, TeacherModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Teacher::from).collect())
    }

    #[instrument(skip(self))]
    async fn next_code_ordinal(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT nextval('teacher_code_seq')")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, teacher), fields(code = %teacher.teacher_code))]
    async fn create(&self, teacher: &NewTeacher) -> RepoResult<Teacher> {
        let sql = format!(
            r"
            INSERT INTO teachers (
                teacher_code, first_name, last_name, other_names, email, phone,
                identification_document_type, identification_document_number,
                identification_document_expiry
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COLUMNS}
            "
        );
        let model = sqlx::query_as::<_, TeacherModel>(&sql)
            .bind(&teacher.teacher_code)
            .bind(&teacher.first_name)
            .bind(&teacher.last_name)
            .bind(&teacher.other_names)
            .bind(&teacher.email)
            .bind(&teacher.phone)
            .bind(&teacher.identification.document_type)
            .bind(&teacher.identification.document_number)
            .bind(teacher.identification.document_expiry)
            .fetch_one(&self.pool)
            .await
            .map_err(map_person_conflict)?;

        Ok(Teacher::from(model))
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: i64, changes: &TeacherChanges) -> RepoResult<Teacher> {
        let sql = format!(
            r"
            UPDATE teachers
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
        let result = sqlx::query_as::<_, TeacherModel>(&sql)
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

        result.map(Teacher::from).ok_or_else(teacher_not_found)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE teachers
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(teacher_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn restore(&self, id: i64) -> RepoResult<Teacher> {
        let sql = format!(
            r"
            UPDATE teachers
            SET deleted_at = NULL, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "
        );
        let result = sqlx::query_as::<_, TeacherModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Teacher::from).ok_or_else(teacher_not_found)
    }
}
