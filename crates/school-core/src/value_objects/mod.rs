//! Value objects - immutable types that represent domain concepts

mod attendance_state;
mod subject;
mod subject_code;

pub use attendance_state::{AttendanceAction, AttendanceState};
pub use subject::{StudentKind, SubjectKind, SubjectType, TeacherKind};
pub use subject_code::generate_subject_code;
