//! Teacher entity

use chrono::{DateTime, Utc};

use super::{full_name, IdentityDocument};

/// Member of staff who keeps attendance like a student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    pub id: i64,
    pub teacher_code: String,
    pub first_name: String,
    pub last_name: String,
    pub other_names: Option<String>,
    pub email: Option<String>,
    pub phone: String,
    pub identification: IdentityDocument,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Teacher {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, self.other_names.as_deref(), &self.last_name)
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeacher {
    pub teacher_code: String,
    pub first_name: String,
    pub last_name: String,
    pub other_names: Option<String>,
    pub email: Option<String>,
    pub phone: String,
    pub identification: IdentityDocument,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub other_names: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub identification: IdentityDocument,
}
