//! Service context - dependency container for services
//!
//! Holds the repositories, both attendance ledgers, the notification gateway,
//! and the token service.

use std::sync::Arc;

use chrono::{DateTime, Local};
use school_common::JwtService;
use school_core::traits::{
    AttendanceRepository, GuardianRepository, NotificationGateway, StudentRepository,
    TeacherRepository, UserRepository,
};
use school_core::value_objects::{StudentKind, TeacherKind};

use super::clock::{Clock, SystemClock};
use super::error::{ServiceError, ServiceResult};
use super::ledger::AttendanceLedger;
use super::notifications::LogNotificationGateway;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    student_repo: Arc<dyn StudentRepository>,
    teacher_repo: Arc<dyn TeacherRepository>,
    guardian_repo: Arc<dyn GuardianRepository>,
    user_repo: Arc<dyn UserRepository>,

    // Ledgers
    student_attendance: AttendanceLedger<StudentKind>,
    teacher_attendance: AttendanceLedger<TeacherKind>,

    notifier: Arc<dyn NotificationGateway>,
    jwt_service: Arc<JwtService>,
    clock: Arc<dyn Clock>,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn student_repo(&self) -> &dyn StudentRepository {
        self.student_repo.as_ref()
    }

    pub fn teacher_repo(&self) -> &dyn TeacherRepository {
        self.teacher_repo.as_ref()
    }

    pub fn guardian_repo(&self) -> &dyn GuardianRepository {
        self.guardian_repo.as_ref()
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    // === Ledgers ===

    pub fn student_attendance(&self) -> &AttendanceLedger<StudentKind> {
        &self.student_attendance
    }

    pub fn teacher_attendance(&self) -> &AttendanceLedger<TeacherKind> {
        &self.teacher_attendance
    }

    // === Services ===

    /// Shared handle, so dispatch can move it into a spawned task
    pub fn notifier(&self) -> Arc<dyn NotificationGateway> {
        Arc::clone(&self.notifier)
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Current server-local time
    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("student_attendance", &self.student_attendance)
            .field("teacher_attendance", &self.teacher_attendance)
            .field("jwt_service", &self.jwt_service)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    student_repo: Option<Arc<dyn StudentRepository>>,
    teacher_repo: Option<Arc<dyn TeacherRepository>>,
    guardian_repo: Option<Arc<dyn GuardianRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    student_attendance: Option<Arc<dyn AttendanceRepository<StudentKind>>>,
    teacher_attendance: Option<Arc<dyn AttendanceRepository<TeacherKind>>>,
    notifier: Option<Arc<dyn NotificationGateway>>,
    jwt_service: Option<Arc<JwtService>>,
    clock: Option<Arc<dyn Clock>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn student_repo(mut self, repo: Arc<dyn StudentRepository>) -> Self {
        self.student_repo = Some(repo);
        self
    }

    pub fn teacher_repo(mut self, repo: Arc<dyn TeacherRepository>) -> Self {
        self.teacher_repo = Some(repo);
        self
    }

    pub fn guardian_repo(mut self, repo: Arc<dyn GuardianRepository>) -> Self {
        self.guardian_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn student_attendance(mut self, repo: Arc<dyn AttendanceRepository<StudentKind>>) -> Self {
        self.student_attendance = Some(repo);
        self
    }

    pub fn teacher_attendance(mut self, repo: Arc<dyn AttendanceRepository<TeacherKind>>) -> Self {
        self.teacher_attendance = Some(repo);
        self
    }

    /// Defaults to [`LogNotificationGateway`]
    pub fn notifier(mut self, notifier: Arc<dyn NotificationGateway>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Defaults to [`SystemClock`]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            student_repo: self.student_repo.ok_or_else(|| missing("student_repo"))?,
            teacher_repo: self.teacher_repo.ok_or_else(|| missing("teacher_repo"))?,
            guardian_repo: self.guardian_repo.ok_or_else(|| missing("guardian_repo"))?,
            user_repo: self.user_repo.ok_or_else(|| missing("user_repo"))?,
            student_attendance: AttendanceLedger::new(
                self.student_attendance.ok_or_else(|| missing("student_attendance"))?,
            ),
            teacher_attendance: AttendanceLedger::new(
                self.teacher_attendance.ok_or_else(|| missing("teacher_attendance"))?,
            ),
            notifier: self.notifier.unwrap_or_else(|| Arc::new(LogNotificationGateway)),
            jwt_service: self.jwt_service.ok_or_else(|| missing("jwt_service"))?,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        })
    }
}

fn missing(dependency: &str) -> ServiceError {
    ServiceError::validation(format!("{dependency} is required"))
}
