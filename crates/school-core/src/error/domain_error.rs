//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::SubjectType;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("{0} Not Found")]
    SubjectNotFound(SubjectType),

    #[error("Guardian Not Found")]
    GuardianNotFound,

    #[error("User Not Found")]
    UserNotFound,

    #[error("{0} has not checked in")]
    NotCheckedIn(SubjectType),

    // =========================================================================
    // Invalid Transitions
    // =========================================================================
    #[error("{0} has already checked in")]
    AlreadyCheckedIn(SubjectType),

    #[error("{0} has already checked out")]
    AlreadyCheckedOut(SubjectType),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Phone number already in use")]
    PhoneAlreadyExists,

    #[error("Code already in use")]
    CodeAlreadyExists,

    // =========================================================================
    // Invariant Violations
    // =========================================================================
    #[error("{affected} {kind} attendance records matched a single day")]
    AttendanceInvariant { kind: SubjectType, affected: u64 },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Notification error: {0}")]
    NotificationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::SubjectNotFound(SubjectType::Student) => "UNKNOWN_STUDENT",
            Self::SubjectNotFound(SubjectType::Teacher) => "UNKNOWN_TEACHER",
            Self::GuardianNotFound => "UNKNOWN_GUARDIAN",
            Self::UserNotFound => "UNKNOWN_USER",
            Self::NotCheckedIn(_) => "NOT_CHECKED_IN",

            // Transitions
            Self::AlreadyCheckedIn(_) => "ALREADY_CHECKED_IN",
            Self::AlreadyCheckedOut(_) => "ALREADY_CHECKED_OUT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::PhoneAlreadyExists => "PHONE_ALREADY_EXISTS",
            Self::CodeAlreadyExists => "CODE_ALREADY_EXISTS",

            // Invariants
            Self::AttendanceInvariant { .. } => "ATTENDANCE_INVARIANT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::NotificationError(_) => "NOTIFICATION_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SubjectNotFound(_)
                | Self::GuardianNotFound
                | Self::UserNotFound
                | Self::NotCheckedIn(_)
        )
    }

    /// Check if this rejects an attendance action for the day
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::AlreadyCheckedIn(_) | Self::AlreadyCheckedOut(_))
    }

    /// Check if this is a validation error (uniqueness conflicts included)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_)) || self.is_conflict()
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists | Self::PhoneAlreadyExists | Self::CodeAlreadyExists
        )
    }
}
