//! PostgreSQL implementation of AttendanceRepository
//!
//! One generic repository serves both populations; the subject kind picks
//! the table. Check-in and check-out are each a single statement so the
//! one-record-per-day rule holds under concurrent requests.

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::instrument;

use school_core::entities::AttendanceRecord;
use school_core::traits::{AttendanceFilter, AttendanceRepository, RepoResult};
use school_core::value_objects::{StudentKind, SubjectKind, TeacherKind};

use crate::models::AttendanceModel;

use super::error::map_db_error;

/// Binds a subject kind to its attendance table
pub trait AttendanceTable: SubjectKind {
    const TABLE: &'static str;
}

impl AttendanceTable for StudentKind {
    const TABLE: &'static str = "student_attendance";
}

impl AttendanceTable for TeacherKind {
    const TABLE: &'static str = "teacher_attendance";
}

/// Statements for one attendance table, rendered once at construction
#[derive(Debug, Clone)]
struct Statements {
    find: String,
    insert_if_absent: String,
    close_open: String,
    list_checked_in: String,
    list_checked_out: String,
    history: String,
}

impl Statements {
    fn for_table(table: &str) -> Self {
        let columns = AttendanceModel::COLUMNS;
        Self {
            find: format!("SELECT {columns} FROM {table} WHERE subject_id = $1 AND date = $2"),
            insert_if_absent: format!(
                r"
                INSERT INTO {table} (subject_id, date, checkin_at, created_at, updated_at)
                VALUES ($1, $2, $3, $3, $3)
                ON CONFLICT (subject_id, date) DO NOTHING
                RETURNING {columns}
                "
            ),
            close_open: format!(
                r"
                UPDATE {table}
                SET checkout_at = $3, updated_at = $3
                WHERE subject_id = $1 AND date = $2
                  AND checkin_at IS NOT NULL AND checkout_at IS NULL
                "
            ),
            list_checked_in: format!(
                "SELECT {columns} FROM {table} WHERE date = $1 AND checkin_at IS NOT NULL ORDER BY checkin_at"
            ),
            list_checked_out: format!(
                "SELECT {columns} FROM {table} WHERE date = $1 AND checkout_at IS NOT NULL ORDER BY checkout_at"
            ),
            history: format!(
                "SELECT {columns} FROM {table} WHERE subject_id = $1 ORDER BY date DESC"
            ),
        }
    }
}

/// PostgreSQL implementation of AttendanceRepository
pub struct PgAttendanceRepository<K> {
    pool: PgPool,
    sql: Statements,
    _kind: PhantomData<fn() -> K>,
}

impl<K: AttendanceTable> PgAttendanceRepository<K> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            sql: Statements::for_table(K::TABLE),
            _kind: PhantomData,
        }
    }
}

impl<K> Clone for PgAttendanceRepository<K> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            sql: self.sql.clone(),
            _kind: PhantomData,
        }
    }
}

#[async_trait]
impl<K: AttendanceTable> AttendanceRepository<K> for PgAttendanceRepository<K> {
    #[instrument(skip(self), fields(table = K::TABLE))]
    async fn find(&self, subject_id: i64, date: NaiveDate) -> RepoResult<Option<AttendanceRecord>> {
        let result = sqlx::query_as::<_, AttendanceModel>(&self.sql.find)
            .bind(subject_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(AttendanceRecord::from))
    }

    #[instrument(skip(self), fields(table = K::TABLE))]
    async fn insert_if_absent(
        &self,
        subject_id: i64,
        date: NaiveDate,
        at: DateTime<Utc>,
    ) -> RepoResult<Option<AttendanceRecord>> {
        let result = sqlx::query_as::<_, AttendanceModel>(&self.sql.insert_if_absent)
            .bind(subject_id)
            .bind(date)
            .bind(at)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(AttendanceRecord::from))
    }

    #[instrument(skip(self), fields(table = K::TABLE))]
    async fn close_open(&self, subject_id: i64, date: NaiveDate, at: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query(&self.sql.close_open)
            .bind(subject_id)
            .bind(date)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self), fields(table = K::TABLE))]
    async fn list_on(&self, date: NaiveDate, filter: AttendanceFilter) -> RepoResult<Vec<AttendanceRecord>> {
        let sql = match filter {
            AttendanceFilter::CheckedIn => &self.sql.list_checked_in,
            AttendanceFilter::CheckedOut => &self.sql.list_checked_out,
        };
        let rows = sqlx::query_as::<_, AttendanceModel>(sql)
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(AttendanceRecord::from).collect())
    }

    #[instrument(skip(self), fields(table = K::TABLE))]
    async fn history(&self, subject_id: i64) -> RepoResult<Vec<AttendanceRecord>> {
        let rows = sqlx::query_as::<_, AttendanceModel>(&self.sql.history)
            .bind(subject_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(AttendanceRecord::from).collect())
    }
}
