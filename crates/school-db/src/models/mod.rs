//! Database models - SQLx-compatible structs for PostgreSQL tables

mod attendance;
mod guardian;
mod student;
mod teacher;
mod user;

pub use attendance::AttendanceModel;
pub use guardian::GuardianModel;
pub use student::StudentModel;
pub use teacher::TeacherModel;
pub use user::UserModel;
