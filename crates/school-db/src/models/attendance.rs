//! Attendance database model (shared by both attendance tables)

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct AttendanceModel {
    pub id: i64,
    pub subject_id: i64,
    pub date: NaiveDate,
    pub checkin_at: Option<DateTime<Utc>>,
    pub checkout_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttendanceModel {
    pub const COLUMNS: &'static str =
        "id, subject_id, date, checkin_at, checkout_at, created_at, updated_at";
}
