//! Student handlers
//!
//! `/students/{id}` names a numeric id for the CRUD routes and a student
//! code for the attendance, badge and welcome routes.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use school_service::{
    AttendanceService, CreateStudentRequest, DetailResponse, GuardianResponse, StudentEnvelope,
    StudentHistoryResponse, StudentListResponse, StudentQuery, StudentService,
    UpdateStudentRequest, QR_CONTENT_TYPE,
};

use crate::extractors::{AuthUser, RecordId, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /students?student_code=
pub async fn index(
    State(state): State<AppState>,
    params: Result<Query<StudentQuery>, QueryRejection>,
) -> ApiResult<Json<StudentListResponse>> {
    let params = super::query(params)?;
    let students = StudentService::new(state.service_context())
        .list(params.student_code.as_deref())
        .await?;
    Ok(Json(StudentListResponse { students }))
}

/// GET /students/{id}
pub async fn show(State(state): State<AppState>, RecordId(id): RecordId) -> ApiResult<Json<StudentEnvelope>> {
    let student = StudentService::new(state.service_context()).get(id).await?;
    Ok(Json(StudentEnvelope { student }))
}

/// POST /students
pub async fn store(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateStudentRequest>,
) -> ApiResult<Created<Json<StudentEnvelope>>> {
    let student = StudentService::new(state.service_context()).create(request).await?;
    Ok(Created(Json(StudentEnvelope { student })))
}

/// PUT /students/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    RecordId(id): RecordId,
    ValidatedJson(request): ValidatedJson<UpdateStudentRequest>,
) -> ApiResult<Json<DetailResponse>> {
    StudentService::new(state.service_context()).update(id, request).await?;
    Ok(Json(DetailResponse::new("Student updated successfully")))
}

/// DELETE /students/{id}
pub async fn destroy(
    State(state): State<AppState>,
    _auth: AuthUser,
    RecordId(id): RecordId,
) -> ApiResult<NoContent> {
    StudentService::new(state.service_context()).delete(id).await?;
    Ok(NoContent)
}

/// PUT /students/restore/{id}
pub async fn restore(
    State(state): State<AppState>,
    _auth: AuthUser,
    RecordId(id): RecordId,
) -> ApiResult<Json<DetailResponse>> {
    StudentService::new(state.service_context()).restore(id).await?;
    Ok(Json(DetailResponse::new("Student restored successfully")))
}

/// POST /students/{code}/check-in
pub async fn check_in(State(state): State<AppState>, Path(code): Path<String>) -> ApiResult<Json<DetailResponse>> {
    let detail = AttendanceService::new(state.service_context())
        .check_in_student(&code)
        .await?;
    Ok(Json(detail))
}

/// POST /students/{code}/check-out
pub async fn check_out(State(state): State<AppState>, Path(code): Path<String>) -> ApiResult<Json<DetailResponse>> {
    let detail = AttendanceService::new(state.service_context())
        .check_out_student(&code)
        .await?;
    Ok(Json(detail))
}

/// GET /students/{code}/qr-code
pub async fn qr_code(State(state): State<AppState>, Path(code): Path<String>) -> ApiResult<impl IntoResponse> {
    let svg = StudentService::new(state.service_context()).qr_code(&code).await?;
    Ok(([(header::CONTENT_TYPE, QR_CONTENT_TYPE)], svg))
}

/// GET /students/{code}/guardians
pub async fn guardians(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<Vec<GuardianResponse>>> {
    let guardians = StudentService::new(state.service_context()).guardians(&code).await?;
    Ok(Json(guardians))
}

/// GET /students/{code}/attendance
pub async fn attendance(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<StudentHistoryResponse>> {
    let history = StudentService::new(state.service_context()).history(&code).await?;
    Ok(Json(history))
}

/// POST /students/{code}/welcome
pub async fn welcome(State(state): State<AppState>, Path(code): Path<String>) -> ApiResult<Json<DetailResponse>> {
    let detail = StudentService::new(state.service_context()).welcome(&code).await?;
    Ok(Json(detail))
}
