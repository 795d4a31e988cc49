//! Guardian database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for guardians table
#[derive(Debug, Clone, FromRow)]
pub struct GuardianModel {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub other_names: Option<String>,
    pub email: Option<String>,
    pub phone: String,
    pub identification_document_type: Option<String>,
    pub identification_document_number: Option<String>,
    pub identification_document_expiry: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl GuardianModel {
    pub const COLUMNS: &'static str = "id, first_name, last_name, other_names, email, phone, \
         identification_document_type, identification_document_number, identification_document_expiry, \
         created_at, updated_at, deleted_at";
}
