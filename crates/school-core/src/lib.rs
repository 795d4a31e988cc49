//! # school-core
//!
//! Domain layer containing entities, the attendance state machine, repository traits,
//! and notification events. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    full_name, AttendanceRecord, Guardian, GuardianChanges, IdentityDocument, NewGuardian,
    NewStudent, NewTeacher, NewUser, Student, StudentChanges, Teacher, TeacherChanges, User,
    UserChanges,
};
pub use error::DomainError;
pub use events::{Notification, NotificationAttachment, NotificationKind, Recipient};
pub use traits::{
    AttendanceFilter, AttendanceRepository, GuardianRepository, NotificationGateway,
    RecordScope, RepoResult, StudentRepository, TeacherRepository, UserRepository,
};
pub use value_objects::{
    generate_subject_code, AttendanceAction, AttendanceState, StudentKind, SubjectKind,
    SubjectType, TeacherKind,
};
