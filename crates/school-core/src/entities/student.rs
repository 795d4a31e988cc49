//! Student entity

use chrono::{DateTime, Utc};

use super::full_name;

/// Student enrolled at the school
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
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

impl Student {
    /// Name shown in notifications
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, self.other_names.as_deref(), &self.last_name)
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Fields for registering a student; the code is assigned by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub student_code: String,
    pub first_name: String,
    pub last_name: String,
    pub other_names: Option<String>,
    pub email: Option<String>,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub other_names: Option<String>,
    pub email: Option<String>,
}

impl StudentChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.other_names.is_none()
            && self.email.is_none()
    }
}
