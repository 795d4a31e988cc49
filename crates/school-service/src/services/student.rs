//! Student service
//!
//! Student directory operations plus the per-student views (guardians,
//! attendance history, QR badge) and the welcome workflow.

use school_core::entities::{NewStudent, Student, StudentChanges};
use school_core::events::{Notification, NotificationKind, Recipient};
use school_core::traits::RecordScope;
use school_core::value_objects::{generate_subject_code, SubjectType};
use school_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{
    AttendanceTimesResponse, CreateStudentRequest, DetailResponse, GuardianResponse,
    StudentHistoryResponse, StudentResponse, UpdateStudentRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notifications::dispatch;
use super::qr;

const KIND: SubjectType = SubjectType::Student;

/// Student service
pub struct StudentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StudentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Active student by public code
    pub async fn find_by_code(&self, code: &str) -> ServiceResult<Student> {
        Ok(self
            .ctx
            .student_repo()
            .find_by_code(code, RecordScope::Active)
            .await?
            .ok_or(DomainError::SubjectNotFound(KIND))?)
    }

    /// Guardians to notify about a student: linked, active, with an email
    pub async fn recipients(&self, student: &Student) -> ServiceResult<Vec<Recipient>> {
        let guardians = self.ctx.student_repo().guardians(student.id).await?;

        Ok(guardians
            .into_iter()
            .filter_map(|g| {
                g.email.map(|email| Recipient {
                    email,
                    name: g.first_name,
                })
            })
            .collect())
    }

    /// All active students, or the one with the given code
    #[instrument(skip(self))]
    pub async fn list(&self, code: Option<&str>) -> ServiceResult<Vec<StudentResponse>> {
        if let Some(code) = code.filter(|c| !c.is_empty()) {
            let student = self.find_by_code(code).await?;
            return Ok(vec![StudentResponse::from(student)]);
        }

        let students = self.ctx.student_repo().list().await?;
        Ok(students.into_iter().map(StudentResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> ServiceResult<StudentResponse> {
        let student = self
            .ctx
            .student_repo()
            .find_by_id(id, RecordScope::Active)
            .await?
            .ok_or(DomainError::SubjectNotFound(KIND))?;

        Ok(StudentResponse::from(student))
    }

    /// Register a student with a freshly generated code.
    ///
    /// Guardian ids that do not name an active guardian are skipped.
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: CreateStudentRequest) -> ServiceResult<StudentResponse> {
        let ordinal = self.ctx.student_repo().next_code_ordinal().await?;
        let new_student = NewStudent {
            student_code: generate_subject_code(KIND, ordinal),
            first_name: request.first_name,
            last_name: request.last_name,
            other_names: request.other_names,
            email: request.email,
        };
        let guardian_ids = request.guardians.unwrap_or_default();

        let student = self.ctx.student_repo().create(&new_student, &guardian_ids).await?;

        info!(
            student_id = student.id,
            code = %student.student_code,
            guardians = guardian_ids.len(),
            "Student created"
        );
        Ok(StudentResponse::from(student))
    }

    /// Partial update; listed guardians are linked in addition to existing ones
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: UpdateStudentRequest) -> ServiceResult<StudentResponse> {
        let changes = StudentChanges::from(&request);
        let student = self.ctx.student_repo().update(id, &changes).await?;

        if let Some(guardian_ids) = request.guardians.filter(|ids| !ids.is_empty()) {
            self.ctx.student_repo().add_guardians(id, &guardian_ids).await?;
        }

        info!(student_id = id, "Student updated");
        Ok(StudentResponse::from(student))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.ctx.student_repo().delete(id).await?;
        info!(student_id = id, "Student deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn restore(&self, id: i64) -> ServiceResult<StudentResponse> {
        let student = self.ctx.student_repo().restore(id).await?;
        info!(student_id = id, "Student restored");
        Ok(StudentResponse::from(student))
    }

    #[instrument(skip(self))]
    pub async fn guardians(&self, code: &str) -> ServiceResult<Vec<GuardianResponse>> {
        let student = self.find_by_code(code).await?;
        let guardians = self.ctx.student_repo().guardians(student.id).await?;
        Ok(guardians.into_iter().map(GuardianResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn history(&self, code: &str) -> ServiceResult<StudentHistoryResponse> {
        let student = self.find_by_code(code).await?;
        let records = self.ctx.student_attendance().history(student.id).await?;

        Ok(StudentHistoryResponse {
            attendance: records.iter().map(AttendanceTimesResponse::from).collect(),
            student: StudentResponse::from(student),
        })
    }

    /// SVG QR badge encoding the student code
    #[instrument(skip(self))]
    pub async fn qr_code(&self, code: &str) -> ServiceResult<String> {
        let student = self.find_by_code(code).await?;
        qr::render_svg(&student.student_code)
    }

    /// Send the guardians a welcome message with the QR badge attached
    #[instrument(skip(self))]
    pub async fn welcome(&self, code: &str) -> ServiceResult<DetailResponse> {
        let student = self.find_by_code(code).await?;
        let recipients = self.recipients(&student).await?;
        if recipients.is_empty() {
            return Ok(DetailResponse::new("No recipients for welcome notification"));
        }

        let notification = Notification::new(
            NotificationKind::Welcome,
            KIND,
            &student.student_code,
            student.full_name(),
            recipients,
            self.ctx.now(),
        )
        .with_attachment(qr::badge_attachment(&student.student_code)?);

        dispatch(self.ctx.notifier(), notification);
        Ok(DetailResponse::new("Welcome notification queued"))
    }
}
