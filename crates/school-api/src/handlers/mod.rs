//! Route handlers
//!
//! All HTTP request handlers organized by resource.

use axum::extract::{rejection::QueryRejection, Query};

use crate::response::{ApiError, ApiResult};

pub mod attendance;
pub mod auth;
pub mod guardians;
pub mod health;
pub mod students;
pub mod teachers;
pub mod users;

/// Unwrap a query string, reporting malformed values as 422
fn query<T>(query: Result<Query<T>, QueryRejection>) -> ApiResult<T> {
    query
        .map(|Query(inner)| inner)
        .map_err(|e| ApiError::invalid_query(e.body_text()))
}
