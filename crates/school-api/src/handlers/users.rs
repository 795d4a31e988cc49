//! User handlers
//!
//! Account management; every endpoint requires a bearer token.

use axum::{extract::State, Json};
use school_service::{CreateUserRequest, UpdateUserRequest, UserResponse, UserService};

use crate::extractors::{AuthUser, RecordId, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /users
pub async fn index(State(state): State<AppState>, _auth: AuthUser) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = UserService::new(state.service_context()).list().await?;
    Ok(Json(users))
}

/// GET /users/{id}
pub async fn show(
    State(state): State<AppState>,
    _auth: AuthUser,
    RecordId(id): RecordId,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::new(state.service_context()).get(id).await?;
    Ok(Json(user))
}

/// POST /users
pub async fn store(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    let user = UserService::new(state.service_context()).create(request).await?;
    Ok(Created(Json(user)))
}

/// PUT /users/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    RecordId(id): RecordId,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::new(state.service_context()).update(id, request).await?;
    Ok(Json(user))
}

/// DELETE /users/{id}
pub async fn destroy(
    State(state): State<AppState>,
    auth: AuthUser,
    RecordId(id): RecordId,
) -> ApiResult<NoContent> {
    tracing::debug!(actor = auth.id(), user_id = id, "Deleting user");
    UserService::new(state.service_context()).delete(id).await?;
    Ok(NoContent)
}

/// PUT /users/restore/{id}
pub async fn restore(
    State(state): State<AppState>,
    _auth: AuthUser,
    RecordId(id): RecordId,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::new(state.service_context()).restore(id).await?;
    Ok(Json(user))
}
