//! Student database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for students table
#[derive(Debug, Clone, FromRow)]
pub struct StudentModel {
    pub id: i64,
    pub student_code: String,
    pub first_name: String,
    pub last_name: String,
    pub other_names: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl StudentModel {
    /// Column list matching the struct, for SELECT and RETURNING clauses
    pub const COLUMNS: &'static str = "id, student_code, first_name, last_name, other_names, email, \
         created_at, updated_at, deleted_at";
}
