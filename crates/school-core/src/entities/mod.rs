//! Domain entities - core business objects

mod attendance;
mod guardian;
mod person;
mod student;
mod teacher;
mod user;

pub use attendance::AttendanceRecord;
pub use guardian::{Guardian, GuardianChanges, NewGuardian};
pub use person::{full_name, IdentityDocument};
pub use student::{NewStudent, Student, StudentChanges};
pub use teacher::{NewTeacher, Teacher, TeacherChanges};
pub use user::{NewUser, User, UserChanges};
