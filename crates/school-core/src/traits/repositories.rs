//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every lookup takes a [`RecordScope`] so the
//! soft-delete filter is applied in one place by the implementation instead
//! of by each caller.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::entities::{
    AttendanceRecord, Guardian, GuardianChanges, NewGuardian, NewStudent, NewTeacher, NewUser,
    Student, StudentChanges, Teacher, TeacherChanges, User, UserChanges,
};
use crate::error::DomainError;
use crate::value_objects::SubjectKind;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Which rows a lookup may see
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordScope {
    /// Rows without a deletion timestamp
    #[default]
    Active,
    /// All rows, used by restore
    WithDeleted,
}

impl RecordScope {
    #[inline]
    pub fn includes_deleted(self) -> bool {
        matches!(self, Self::WithDeleted)
    }
}

/// Attendance listing filter for a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceFilter {
    /// Records with a check-in, whether or not they have checked out since
    CheckedIn,
    /// Records with a check-out
    CheckedOut,
}

// ============================================================================
// Student Repository
// ============================================================================

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Find student by ID
    async fn find_by_id(&self, id: i64, scope: RecordScope) -> RepoResult<Option<Student>>;

    /// Find student by public code
    async fn find_by_code(&self, code: &str, scope: RecordScope) -> RepoResult<Option<Student>>;

    /// Find several students at once, in no particular order
    async fn find_many(&self, ids: &[i64], scope: RecordScope) -> RepoResult<Vec<Student>>;

    /// List active students
    async fn list(&self) -> RepoResult<Vec<Student>>;

    /// Next ordinal for code generation
    async fn next_code_ordinal(&self) -> RepoResult<i64>;

    /// Create a student and link the given guardians that exist
    async fn create(&self, student: &NewStudent, guardian_ids: &[i64]) -> RepoResult<Student>;

    /// Apply a partial update to an active student
    async fn update(&self, id: i64, changes: &StudentChanges) -> RepoResult<Student>;

    /// Link additional guardians; existing links are kept
    async fn add_guardians(&self, id: i64, guardian_ids: &[i64]) -> RepoResult<()>;

    /// Active guardians linked to a student
    async fn guardians(&self, id: i64) -> RepoResult<Vec<Guardian>>;

    /// Soft delete a student
    async fn delete(&self, id: i64) -> RepoResult<()>;

    /// Clear the deletion timestamp
    async fn restore(&self, id: i64) -> RepoResult<Student>;
}

// ============================================================================
// Teacher Repository
// ============================================================================

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn find_by_id(&self, id: i64, scope: RecordScope) -> RepoResult<Option<Teacher>>;

    async fn find_by_code(&self, code: &str, scope: RecordScope) -> RepoResult<Option<Teacher>>;

    async fn find_many(&self, ids: &[i64], scope: RecordScope) -> RepoResult<Vec<Teacher>>;

    async fn list(&self) -> RepoResult<Vec<Teacher>>;

    async fn next_code_ordinal(&self) -> RepoResult<i64>;

    async fn create(&self, teacher: &NewTeacher) -> RepoResult<Teacher>;

    async fn update(&self, id: i64, changes: &TeacherChanges) -> RepoResult<Teacher>;

    async fn delete(&self, id: i64) -> RepoResult<()>;

    async fn restore(&self, id: i64) -> RepoResult<Teacher>;
}

// ============================================================================
// Guardian Repository
// ============================================================================

#[async_trait]
pub trait GuardianRepository: Send + Sync {
    async fn find_by_id(&self, id: i64, scope: RecordScope) -> RepoResult<Option<Guardian>>;

    /// Active guardians whose phone ends with the given digits
    async fn find_by_phone_suffix(&self, suffix: &str) -> RepoResult<Vec<Guardian>>;

    async fn list(&self) -> RepoResult<Vec<Guardian>>;

    async fn create(&self, guardian: &NewGuardian) -> RepoResult<Guardian>;

    async fn update(&self, id: i64, changes: &GuardianChanges) -> RepoResult<Guardian>;

    async fn delete(&self, id: i64) -> RepoResult<()>;

    async fn restore(&self, id: i64) -> RepoResult<Guardian>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64, scope: RecordScope) -> RepoResult<Option<User>>;

    async fn find_by_email(&self, email: &str, scope: RecordScope) -> RepoResult<Option<User>>;

    async fn list(&self) -> RepoResult<Vec<User>>;

    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    async fn update(&self, id: i64, changes: &UserChanges) -> RepoResult<User>;

    async fn delete(&self, id: i64) -> RepoResult<()>;

    async fn restore(&self, id: i64) -> RepoResult<User>;

    /// Get password hash of an active account for authentication
    async fn get_password_hash(&self, email: &str) -> RepoResult<Option<String>>;
}

// ============================================================================
// Attendance Repository
// ============================================================================

/// Attendance storage for one subject population.
///
/// Implementations must hold at most one record per `(subject_id, date)` and
/// perform [`insert_if_absent`](Self::insert_if_absent) and
/// [`close_open`](Self::close_open) as single atomic statements.
#[async_trait]
pub trait AttendanceRepository<K: SubjectKind>: Send + Sync {
    /// The record for a subject on a day, if any
    async fn find(&self, subject_id: i64, date: NaiveDate) -> RepoResult<Option<AttendanceRecord>>;

    /// Insert a checked-in record unless one already exists for the day.
    /// Returns `None` when a record was already present.
    async fn insert_if_absent(
        &self,
        subject_id: i64,
        date: NaiveDate,
        at: DateTime<Utc>,
    ) -> RepoResult<Option<AttendanceRecord>>;

    /// Set `checkout_at` on the day's record if it is still open.
    /// Returns the number of rows updated.
    async fn close_open(&self, subject_id: i64, date: NaiveDate, at: DateTime<Utc>) -> RepoResult<u64>;

    /// Records for a day matching a filter
    async fn list_on(&self, date: NaiveDate, filter: AttendanceFilter) -> RepoResult<Vec<AttendanceRecord>>;

    /// Every record of a subject, newest day first
    async fn history(&self, subject_id: i64) -> RepoResult<Vec<AttendanceRecord>>;
}
