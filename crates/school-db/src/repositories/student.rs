//! PostgreSQL implementation of StudentRepository

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};
use tracing::instrument;

use school_core::entities::{Guardian, NewStudent, Student, StudentChanges};
use school_core::error::DomainError;
use school_core::traits::{RecordScope, RepoResult, StudentRepository};
use school_core::value_objects::SubjectType;

use crate::models::{GuardianModel, StudentModel};

use super::error::{map_db_error, map_person_conflict};
use super::scope::visible;

const COLUMNS: &str = StudentModel::COLUMNS;

fn student_not_found() -> DomainError {
    DomainError::SubjectNotFound(SubjectType::Student)
}

/// Link existing, active guardians to a student. Unknown ids are skipped.
async fn link_guardians<'e, E>(executor: E, student_id: i64, guardian_ids: &[i64]) -> RepoResult<u64>
where
    E: PgExecutor<'e>,
{
    if guardian_ids.is_empty() {
        return Ok(0);
    }

    let result = sqlx::query(
        r"
        INSERT INTO student_guardians (student_id, guardian_id)
        SELECT $1, g.id FROM guardians g
        WHERE g.id = ANY($2) AND g.deleted_at IS NULL
        ON CONFLICT DO NOTHING
        ",
    )
    .bind(student_id)
    .bind(guardian_ids)
    .execute(executor)
    .await
    .map_err(map_db_error)?;

    Ok(result.rows_affected())
}

/// PostgreSQL implementation of StudentRepository
#[derive(Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    /// Create a new PgStudentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64, scope: RecordScope) -> RepoResult<Option<Student>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM students s WHERE s.id = $1 AND {}",
            visible(scope, "s")
        );
        let result = sqlx::query_as::<_, StudentModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Student::from))
    }

    #[instrument(skip(self))]
    async fn find_by_code(&self, code: &str, scope: RecordScope) -> RepoResult<Option<Student>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM students s WHERE s.student_code = $1 AND {}",
            visible(scope, "s")
        );
        let result = sqlx::query_as::<_, StudentModel>(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Student::from))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_many(&self, ids: &[i64], scope: RecordScope) -> RepoResult<Vec<Student>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {COLUMNS} FROM students s WHERE s.id = ANY($1) AND {}",
            visible(scope, "s")
        );
        let rows = sqlx::query_as::<_, StudentModel>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Student::from).collect())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Student>> {
        let sql = format!("SELECT {COLUMNS} FROM students WHERE deleted_at IS NULL ORDER BY id");
        let rows = sqlx::query_as::<_, StudentModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Student::from).collect())
    }

    #[instrument(skip(self))]
    async fn next_code_ordinal(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT nextval('student_code_seq')")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, student), fields(code = %student.student_code))]
    async fn create(&self, student: &NewStudent, guardian_ids: &[i64]) -> RepoResult<Student> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let sql = format!(
            r"
            INSERT INTO students (student_code, first_name, last_name, other_names, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "
        );
        let model = sqlx::query_as::<_, StudentModel>(&sql)
            .bind(&student.student_code)
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(&student.other_names)
            .bind(&student.email)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_person_conflict)?;

        link_guardians(&mut *tx, model.id, guardian_ids).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(Student::from(model))
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: i64, changes: &StudentChanges) -> RepoResult<Student> {
        let sql = format!(
            r"
            UPDATE students
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                other_names = COALESCE($4, other_names),
                email = COALESCE($5, email),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {COLUMNS}
            "
        );
        let result = sqlx::query_as::<_, StudentModel>(&sql)
            .bind(id)
            .bind(&changes.first_name)
            .bind(&changes.last_name)
            .bind(&changes.other_names)
            .bind(&changes.email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_person_conflict)?;

        result.map(Student::from).ok_or_else(student_not_found)
    }

    #[instrument(skip(self, guardian_ids), fields(count = guardian_ids.len()))]
    async fn add_guardians(&self, id: i64, guardian_ids: &[i64]) -> RepoResult<()> {
        link_guardians(&self.pool, id, guardian_ids).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn guardians(&self, id: i64) -> RepoResult<Vec<Guardian>> {
        let sql = format!(
            r"
            SELECT {} FROM guardians
            WHERE deleted_at IS NULL
              AND id IN (SELECT guardian_id FROM student_guardians WHERE student_id = $1)
            ORDER BY id
            ",
            GuardianModel::COLUMNS
        );
        let rows = sqlx::query_as::<_, GuardianModel>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Guardian::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE students
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(student_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn restore(&self, id: i64) -> RepoResult<Student> {
        let sql = format!(
            r"
            UPDATE students
            SET deleted_at = NULL, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "
        );
        let result = sqlx::query_as::<_, StudentModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Student::from).ok_or_else(student_not_found)
    }
}
