//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in school-core.
//! Each repository handles database operations for a specific domain entity.

mod attendance;
mod error;
mod guardian;
mod scope;
mod student;
mod teacher;
mod user;

pub use attendance::{AttendanceTable, PgAttendanceRepository};
pub use guardian::PgGuardianRepository;
pub use student::PgStudentRepository;
pub use teacher::PgTeacherRepository;
pub use user::PgUserRepository;
