//! Shared person details

use chrono::NaiveDate;

/// Identification document held on file for an adult
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityDocument {
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub document_expiry: Option<NaiveDate>,
}

impl IdentityDocument {
    /// Check if no document details were provided
    pub fn is_empty(&self) -> bool {
        self.document_type.is_none() && self.document_number.is_none() && self.document_expiry.is_none()
    }
}

/// Display name: "first other last", or "first last" without other names
pub fn full_name(first_name: &str, other_names: Option<&str>, last_name: &str) -> String {
    match other_names.map(str::trim).filter(|s| !s.is_empty()) {
        Some(other) => format!("{first_name} {other} {last_name}"),
        None => format!("{first_name} {last_name}"),
    }
}
