//! Ports implemented by the infrastructure crates

mod notifier;
mod repositories;

pub use notifier::NotificationGateway;
pub use repositories::{
    AttendanceFilter, AttendanceRepository, GuardianRepository, RecordScope, RepoResult,
    StudentRepository, TeacherRepository, UserRepository,
};
