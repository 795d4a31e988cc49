//! Daily attendance listings
//!
//! `?date=YYYY-MM-DD` selects the day; the server's current date is used
//! when it is omitted.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use school_core::traits::AttendanceFilter;
use school_service::{
    AttendanceListResponse, AttendanceQuery, AttendanceService, StudentAttendanceResponse,
    TeacherAttendanceResponse,
};

use crate::response::ApiResult;
use crate::state::AppState;

type QueryParams = Result<Query<AttendanceQuery>, QueryRejection>;

async fn students_on(
    state: &AppState,
    params: QueryParams,
    filter: AttendanceFilter,
) -> ApiResult<Json<AttendanceListResponse<StudentAttendanceResponse>>> {
    let params = super::query(params)?;
    let listing = AttendanceService::new(state.service_context())
        .students_on(params.date, filter)
        .await?;
    Ok(Json(listing))
}

async fn teachers_on(
    state: &AppState,
    params: QueryParams,
    filter: AttendanceFilter,
) -> ApiResult<Json<AttendanceListResponse<TeacherAttendanceResponse>>> {
    let params = super::query(params)?;
    let listing = AttendanceService::new(state.service_context())
        .teachers_on(params.date, filter)
        .await?;
    Ok(Json(listing))
}

/// GET /attendance/checked-in
pub async fn students_checked_in(
    State(state): State<AppState>,
    params: QueryParams,
) -> ApiResult<Json<AttendanceListResponse<StudentAttendanceResponse>>> {
    students_on(&state, params, AttendanceFilter::CheckedIn).await
}

/// GET /attendance/checked-out
pub async fn students_checked_out(
    State(state): State<AppState>,
    params: QueryParams,
) -> ApiResult<Json<AttendanceListResponse<StudentAttendanceResponse>>> {
    students_on(&state, params, AttendanceFilter::CheckedOut).await
}

/// GET /teachers-attendance/checked-in
pub async fn teachers_checked_in(
    State(state): State<AppState>,
    params: QueryParams,
) -> ApiResult<Json<AttendanceListResponse<TeacherAttendanceResponse>>> {
    teachers_on(&state, params, AttendanceFilter::CheckedIn).await
}

/// GET /teachers-attendance/checked-out
pub async fn teachers_checked_out(
    State(state): State<AppState>,
    params: QueryParams,
) -> ApiResult<Json<AttendanceListResponse<TeacherAttendanceResponse>>> {
    teachers_on(&state, params, AttendanceFilter::CheckedOut).await
}
