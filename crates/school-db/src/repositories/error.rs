//! Error handling utilities for repositories

use school_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.constraint());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Map a unique violation on a person table to the field that collided.
///
/// Relies on the `<table>_<field>_key` constraint names from the migrations.
pub fn map_person_conflict(e: SqlxError) -> DomainError {
    map_unique_violation(e, |constraint| match constraint {
        Some(c) if c.ends_with("_phone_key") => DomainError::PhoneAlreadyExists,
        Some(c) if c.ends_with("_code_key") => DomainError::CodeAlreadyExists,
        _ => DomainError::EmailAlreadyExists,
    })
}
