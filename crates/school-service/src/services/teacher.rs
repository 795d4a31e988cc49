//! Teacher service

use school_core::entities::{NewTeacher, Teacher, TeacherChanges};
use school_core::events::{Notification, NotificationKind, Recipient};
use school_core::traits::RecordScope;
use school_core::value_objects::{generate_subject_code, SubjectType};
use school_core::{DomainError, IdentityDocument};
use tracing::{info, instrument};

use crate::dto::{
    AttendanceTimesResponse, CreateTeacherRequest, DetailResponse, TeacherHistoryResponse,
    TeacherResponse, UpdateTeacherRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notifications::dispatch;
use super::qr;

const KIND: SubjectType = SubjectType::Teacher;

/// Teacher service
pub struct TeacherService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TeacherService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Active teacher by public code
    pub async fn find_by_code(&self, code: &str) -> ServiceResult<Teacher> {
        Ok(self
            .ctx
            .teacher_repo()
            .find_by_code(code, RecordScope::Active)
            .await?
            .ok_or(DomainError::SubjectNotFound(KIND))?)
    }

    /// Teachers are notified at their own address, when they have one
    pub fn recipients(teacher: &Teacher) -> Vec<Recipient> {
        teacher
            .email
            .iter()
            .map(|email| Recipient {
                email: email.clone(),
                name: teacher.first_name.clone(),
            })
            .collect()
    }

    #[instrument(skip(self))]
    pub async fn list(&self, code: Option<&str>) -> ServiceResult<Vec<TeacherResponse>> {
        if let Some(code) = code.filter(|c| !c.is_empty()) {
            let teacher = self.find_by_code(code).await?;
            return Ok(vec![TeacherResponse::from(teacher)]);
        }

        let teachers = self.ctx.teacher_repo().list().await?;
        Ok(teachers.into_iter().map(TeacherResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> ServiceResult<TeacherResponse> {
        let teacher = self
            .ctx
            .teacher_repo()
            .find_by_id(id, RecordScope::Active)
            .await?
            .ok_or(DomainError::SubjectNotFound(KIND))?;

        Ok(TeacherResponse::from(teacher))
    }

    #[instrument(skip(self, request))]
    pub async fn create(&self, request: CreateTeacherRequest) -> ServiceResult<TeacherResponse> {
        let ordinal = self.ctx.teacher_repo().next_code_ordinal().await?;
        let new_teacher = NewTeacher {
            teacher_code: generate_subject_code(KIND, ordinal),
            first_name: request.first_name,
            last_name: request.last_name,
            other_names: request.other_names,
            email: request.email,
            phone: request.phone,
            identification: IdentityDocument {
                document_type: request.identification_document_type,
                document_number: request.identification_document_number,
                document_expiry: request.identification_document_expiry,
            },
        };

        let teacher = self.ctx.teacher_repo().create(&new_teacher).await?;

        info!(teacher_id = teacher.id, code = %teacher.teacher_code, "Teacher created");
        Ok(TeacherResponse::from(teacher))
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: UpdateTeacherRequest) -> ServiceResult<TeacherResponse> {
        let teacher = self
            .ctx
            .teacher_repo()
            .update(id, &TeacherChanges::from(request))
            .await?;

        info!(teacher_id = id, "Teacher updated");
        Ok(TeacherResponse::from(teacher))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.ctx.teacher_repo().delete(id).await?;
        info!(teacher_id = id, "Teacher deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn restore(&self, id: i64) -> ServiceResult<TeacherResponse> {
        let teacher = self.ctx.teacher_repo().restore(id).await?;
        info!(teacher_id = id, "Teacher restored");
        Ok(TeacherResponse::from(teacher))
    }

    #[instrument(skip(self))]
    pub async fn history(&self, code: &str) -> ServiceResult<TeacherHistoryResponse> {
        let teacher = self.find_by_code(code).await?;
        let records = self.ctx.teacher_attendance().history(teacher.id).await?;

        Ok(TeacherHistoryResponse {
            attendance: records.iter().map(AttendanceTimesResponse::from).collect(),
            teacher: TeacherResponse::from(teacher),
        })
    }

    #[instrument(skip(self))]
    pub async fn qr_code(&self, code: &str) -> ServiceResult<String> {
        let teacher = self.find_by_code(code).await?;
        qr::render_svg(&teacher.teacher_code)
    }

    #[instrument(skip(self))]
    pub async fn welcome(&self, code: &str) -> ServiceResult<DetailResponse> {
        let teacher = self.find_by_code(code).await?;
        let recipients = Self::recipients(&teacher);
        if recipients.is_empty() {
            return Ok(DetailResponse::new("No recipients for welcome notification"));
        }

        let notification = Notification::new(
            NotificationKind::Welcome,
            KIND,
            &teacher.teacher_code,
            teacher.full_name(),
            recipients,
            self.ctx.now(),
        )
        .with_attachment(qr::badge_attachment(&teacher.teacher_code)?);

        dispatch(self.ctx.notifier(), notification);
        Ok(DetailResponse::new("Welcome notification queued"))
    }
}
