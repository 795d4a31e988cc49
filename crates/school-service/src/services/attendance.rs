//! Attendance service
//!
//! Resolves a subject by code, runs the ledger transition, then hands a
//! notification to the gateway without waiting for it. Daily listings embed
//! the owning subject of each record.

use std::collections::HashMap;

use chrono::{DateTime, Local, NaiveDate, Utc};
use school_core::events::{Notification, NotificationKind, Recipient};
use school_core::traits::{AttendanceFilter, RecordScope};
use school_core::value_objects::{AttendanceAction, SubjectType};
use tracing::{instrument, warn};

use crate::dto::{
    AttendanceListResponse, AttendanceTimesResponse, DetailResponse, StudentAttendanceResponse,
    StudentResponse, TeacherAttendanceResponse, TeacherResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notifications::dispatch;
use super::student::StudentService;
use super::teacher::TeacherService;

/// Subject-facing message for a completed transition
fn success_detail(kind: SubjectType, action: AttendanceAction) -> DetailResponse {
    let verb = match action {
        AttendanceAction::CheckIn => "check in",
        AttendanceAction::CheckOut => "check out",
    };
    DetailResponse::new(format!("{kind} {verb} successful"))
}

fn notification_kind(action: AttendanceAction) -> NotificationKind {
    match action {
        AttendanceAction::CheckIn => NotificationKind::CheckIn,
        AttendanceAction::CheckOut => NotificationKind::CheckOut,
    }
}

/// Attendance service
pub struct AttendanceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AttendanceService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Date and stored timestamp from a single clock reading
    fn instant(&self) -> (DateTime<Local>, NaiveDate, DateTime<Utc>) {
        let now = self.ctx.now();
        (now, now.date_naive(), now.with_timezone(&Utc))
    }

    fn notify(
        &self,
        kind: SubjectType,
        action: AttendanceAction,
        code: &str,
        name: String,
        recipients: Vec<Recipient>,
        at: DateTime<Local>,
    ) {
        let notification = Notification::new(notification_kind(action), kind, code, name, recipients, at);
        dispatch(self.ctx.notifier(), notification);
    }

    // ========================================================================
    // Students
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn check_in_student(&self, code: &str) -> ServiceResult<DetailResponse> {
        self.record_student(code, AttendanceAction::CheckIn).await
    }

    #[instrument(skip(self))]
    pub async fn check_out_student(&self, code: &str) -> ServiceResult<DetailResponse> {
        self.record_student(code, AttendanceAction::CheckOut).await
    }

    async fn record_student(&self, code: &str, action: AttendanceAction) -> ServiceResult<DetailResponse> {
        let students = StudentService::new(self.ctx);
        let student = students.find_by_code(code).await?;
        let (now, date, at) = self.instant();

        let ledger = self.ctx.student_attendance();
        match action {
            AttendanceAction::CheckIn => {
                ledger.check_in(student.id, date, at).await?;
            }
            AttendanceAction::CheckOut => {
                ledger.check_out(student.id, date, at).await?;
            }
        }

        // The transition is committed; recipient lookup failures only cost the notification
        match students.recipients(&student).await {
            Ok(recipients) => self.notify(
                SubjectType::Student,
                action,
                &student.student_code,
                student.full_name(),
                recipients,
                now,
            ),
            Err(e) => warn!(error = %e, student_id = student.id, "Could not load guardians to notify"),
        }

        Ok(success_detail(SubjectType::Student, action))
    }

    #[instrument(skip(self))]
    pub async fn students_on(
        &self,
        date: Option<NaiveDate>,
        filter: AttendanceFilter,
    ) -> ServiceResult<AttendanceListResponse<StudentAttendanceResponse>> {
        let date = date.unwrap_or_else(|| self.ctx.now().date_naive());
        let records = self.ctx.student_attendance().records_on(date, filter).await?;

        let ids: Vec<i64> = records.iter().map(|r| r.subject_id).collect();
        // Deleted students keep appearing in listings of days they attended
        let students: HashMap<i64, StudentResponse> = self
            .ctx
            .student_repo()
            .find_many(&ids, RecordScope::WithDeleted)
            .await?
            .into_iter()
            .map(|s| (s.id, StudentResponse::from(s)))
            .collect();

        let entries = records
            .iter()
            .filter_map(|record| {
                students.get(&record.subject_id).map(|student| StudentAttendanceResponse {
                    times: AttendanceTimesResponse::from(record),
                    student: student.clone(),
                })
            })
            .collect();

        Ok(AttendanceListResponse::new(entries))
    }

    // ========================================================================
    // Teachers
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn check_in_teacher(&self, code: &str) -> ServiceResult<DetailResponse> {
        self.record_teacher(code, AttendanceAction::CheckIn).await
    }

    #[instrument(skip(self))]
    pub async fn check_out_teacher(&self, code: &str) -> ServiceResult<DetailResponse> {
        self.record_teacher(code, AttendanceAction::CheckOut).await
    }

    async fn record_teacher(&self, code: &str, action: AttendanceAction) -> ServiceResult<DetailResponse> {
        let teacher = TeacherService::new(self.ctx).find_by_code(code).await?;
        let (now, date, at) = self.instant();

        let ledger = self.ctx.teacher_attendance();
        match action {
            AttendanceAction::CheckIn => {
                ledger.check_in(teacher.id, date, at).await?;
            }
            AttendanceAction::CheckOut => {
                ledger.check_out(teacher.id, date, at).await?;
            }
        }

        self.notify(
            SubjectType::Teacher,
            action,
            &teacher.teacher_code,
            teacher.full_name(),
            TeacherService::recipients(&teacher),
            now,
        );

        Ok(success_detail(SubjectType::Teacher, action))
    }

    #[instrument(skip(self))]
    pub async fn teachers_on(
        &self,
        date: Option<NaiveDate>,
        filter: AttendanceFilter,
    ) -> ServiceResult<AttendanceListResponse<TeacherAttendanceResponse>> {
        let date = date.unwrap_or_else(|| self.ctx.now().date_naive());
        let records = self.ctx.teacher_attendance().records_on(date, filter).await?;

        let ids: Vec<i64> = records.iter().map(|r| r.subject_id).collect();
        let teachers: HashMap<i64, TeacherResponse> = self
            .ctx
            .teacher_repo()
            .find_many(&ids, RecordScope::WithDeleted)
            .await?
            .into_iter()
            .map(|t| (t.id, TeacherResponse::from(t)))
            .collect();

        let entries = records
            .iter()
            .filter_map(|record| {
                teachers.get(&record.subject_id).map(|teacher| TeacherAttendanceResponse {
                    times: AttendanceTimesResponse::from(record),
                    teacher: teacher.clone(),
                })
            })
            .collect();

        Ok(AttendanceListResponse::new(entries))
    }
}
