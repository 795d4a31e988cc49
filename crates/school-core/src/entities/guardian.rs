//! Guardian entity - parent or carer linked to students

use chrono::{DateTime, Utc};

use super::{full_name, IdentityDocument};

/// Guardian contact, notified on attendance events of linked students
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guardian {
    pub id: i64,
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

impl Guardian {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, self.other_names.as_deref(), &self.last_name)
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Trailing digits used to match phone numbers written with or without
    /// a country prefix
    pub fn phone_suffix(phone: &str) -> String {
        const SIGNIFICANT_DIGITS: usize = 9;

        let digits: Vec<char> = phone.chars().filter(char::is_ascii_digit).collect();
        let start = digits.len().saturating_sub(SIGNIFICANT_DIGITS);
        digits[start..].iter().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuardian {
    pub first_name: String,
    pub last_name: String,
    pub other_names: Option<String>,
    pub email: Option<String>,
    pub phone: String,
    pub identification: IdentityDocument,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardianChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub other_names: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub identification: IdentityDocument,
}
