//! Guardian handlers
//!
//! Reads are open; writes require a bearer token.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use school_service::{
    CreateGuardianRequest, DetailResponse, GuardianQuery, GuardianResponse, GuardianService,
    UpdateGuardianRequest,
};

use crate::extractors::{AuthUser, RecordId, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /guardians?phone=
pub async fn index(
    State(state): State<AppState>,
    params: Result<Query<GuardianQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<GuardianResponse>>> {
    let params = super::query(params)?;
    let guardians = GuardianService::new(state.service_context())
        .list(params.phone.as_deref())
        .await?;
    Ok(Json(guardians))
}

/// GET /guardians/{id}
pub async fn show(State(state): State<AppState>, RecordId(id): RecordId) -> ApiResult<Json<GuardianResponse>> {
    let guardian = GuardianService::new(state.service_context()).get(id).await?;
    Ok(Json(guardian))
}

/// POST /guardians
pub async fn store(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateGuardianRequest>,
) -> ApiResult<Created<Json<GuardianResponse>>> {
    let guardian = GuardianService::new(state.service_context()).create(request).await?;
    Ok(Created(Json(guardian)))
}

/// PUT /guardians/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    RecordId(id): RecordId,
    ValidatedJson(request): ValidatedJson<UpdateGuardianRequest>,
) -> ApiResult<Json<DetailResponse>> {
    GuardianService::new(state.service_context()).update(id, request).await?;
    Ok(Json(DetailResponse::new("Guardian updated successfully")))
}

/// DELETE /guardians/{id}
pub async fn destroy(
    State(state): State<AppState>,
    _auth: AuthUser,
    RecordId(id): RecordId,
) -> ApiResult<NoContent> {
    GuardianService::new(state.service_context()).delete(id).await?;
    Ok(NoContent)
}

/// PUT /guardians/restore/{id}
pub async fn restore(
    State(state): State<AppState>,
    _auth: AuthUser,
    RecordId(id): RecordId,
) -> ApiResult<Json<DetailResponse>> {
    GuardianService::new(state.service_context()).restore(id).await?;
    Ok(Json(DetailResponse::new("Guardian restored successfully")))
}
