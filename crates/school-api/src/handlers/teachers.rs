//! Teacher handlers
//!
//! `/teachers/{id}` names a numeric id for the CRUD routes and a teacher
//! code for the attendance, badge and welcome routes.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use school_service::{
    AttendanceService, CreateTeacherRequest, DetailResponse, TeacherEnvelope,
    TeacherHistoryResponse, TeacherListResponse, TeacherQuery, TeacherService,
    UpdateTeacherRequest, QR_CONTENT_TYPE,
};

use crate::extractors::{AuthUser, RecordId, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /teachers?teacher_code=
pub async fn index(
    State(state): State<AppState>,
    params: Result<Query<TeacherQuery>, QueryRejection>,
) -> ApiResult<Json<TeacherListResponse>> {
    let params = super::query(params)?;
    let teachers = TeacherService::new(state.service_context())
        .list(params.teacher_code.as_deref())
        .await?;
    Ok(Json(TeacherListResponse { teachers }))
}

/// GET /teachers/{id}
pub async fn show(State(state): State<AppState>, RecordId(id): RecordId) -> ApiResult<Json<TeacherEnvelope>> {
    let teacher = TeacherService::new(state.service_context()).get(id).await?;
    Ok(Json(TeacherEnvelope { teacher }))
}

/// POST /teachers
pub async fn store(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateTeacherRequest>,
) -> ApiResult<Created<Json<TeacherEnvelope>>> {
    let teacher = TeacherService::new(state.service_context()).create(request).await?;
    Ok(Created(Json(TeacherEnvelope { teacher })))
}

/// PUT /teachers/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    RecordId(id): RecordId,
    ValidatedJson(request): ValidatedJson<UpdateTeacherRequest>,
) -> ApiResult<Json<DetailResponse>> {
    TeacherService::new(state.service_context()).update(id, request).await?;
    Ok(Json(DetailResponse::new("Teacher updated successfully")))
}

/// DELETE /teachers/{id}
pub async fn destroy(
    State(state): State<AppState>,
    _auth: AuthUser,
    RecordId(id): RecordId,
) -> ApiResult<NoContent> {
    TeacherService::new(state.service_context()).delete(id).await?;
    Ok(NoContent)
}

/// PUT /teachers/restore/{id}
pub async fn restore(
    State(state): State<AppState>,
    _auth: AuthUser,
    RecordId(id): RecordId,
) -> ApiResult<Json<DetailResponse>> {
    TeacherService::new(state.service_context()).restore(id).await?;
    Ok(Json(DetailResponse::new("Teacher restored successfully")))
}

/// POST /teachers/{code}/check-in
pub async fn check_in(State(state): State<AppState>, Path(code): Path<String>) -> ApiResult<Json<DetailResponse>> {
    let detail = AttendanceService::new(state.service_context())
        .check_in_teacher(&code)
        .await?;
    Ok(Json(detail))
}

/// POST /teachers/{code}/check-out
pub async fn check_out(State(state): State<AppState>, Path(code): Path<String>) -> ApiResult<Json<DetailResponse>> {
    let detail = AttendanceService::new(state.service_context())
        .check_out_teacher(&code)
        .await?;
    Ok(Json(detail))
}

/// GET /teachers/{code}/qr-code
pub async fn qr_code(State(state): State<AppState>, Path(code): Path<String>) -> ApiResult<impl IntoResponse> {
    let svg = TeacherService::new(state.service_context()).qr_code(&code).await?;
    Ok(([(header::CONTENT_TYPE, QR_CONTENT_TYPE)], svg))
}

/// GET /teachers/{code}/attendance
pub async fn attendance(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<TeacherHistoryResponse>> {
    let history = TeacherService::new(state.service_context()).history(&code).await?;
    Ok(Json(history))
}

/// POST /teachers/{code}/welcome
pub async fn welcome(State(state): State<AppState>, Path(code): Path<String>) -> ApiResult<Json<DetailResponse>> {
    let detail = TeacherService::new(state.service_context()).welcome(&code).await?;
    Ok(Json(detail))
}
