//! Business logic services
//!
//! Service layer implementations that handle business logic, validation, and
//! orchestration of domain operations.

pub mod attendance;
pub mod auth;
pub mod clock;
pub mod context;
pub mod error;
pub mod guardian;
pub mod ledger;
pub mod notifications;
pub mod qr;
pub mod student;
pub mod teacher;
pub mod user;

// Re-export all services for convenience
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use clock::{Clock, SystemClock};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use guardian::GuardianService;
pub use ledger::AttendanceLedger;
pub use notifications::{dispatch, LogNotificationGateway};
pub use qr::{render_svg, QR_CONTENT_TYPE};
pub use student::StudentService;
pub use teacher::TeacherService;
pub use user::UserService;
