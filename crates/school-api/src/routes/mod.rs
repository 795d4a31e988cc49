//! Route definitions
//!
//! Numeric ids and subject codes share the `/students/:id` and
//! `/teachers/:id` prefixes; the router tells them apart by the trailing
//! segment, and the handlers decide whether the segment is an id or a code.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{attendance, auth, guardians, health, students, teachers, users};
use crate::state::AppState;

/// Create the main router with every endpoint
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(guardian_routes())
        .merge(student_routes())
        .merge(teacher_routes())
        .merge(attendance_routes())
}

/// Liveness, readiness and ping
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(health::ping))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::index).post(users::store))
        .route(
            "/users/:id",
            get(users::show).put(users::update).delete(users::destroy),
        )
        .route("/users/restore/:id", put(users::restore))
}

fn guardian_routes() -> Router<AppState> {
    Router::new()
        .route("/guardians", get(guardians::index).post(guardians::store))
        .route(
            "/guardians/:id",
            get(guardians::show).put(guardians::update).delete(guardians::destroy),
        )
        .route("/guardians/restore/:id", put(guardians::restore))
}

fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/students", get(students::index).post(students::store))
        .route(
            "/students/:id",
            get(students::show).put(students::update).delete(students::destroy),
        )
        .route("/students/restore/:id", put(students::restore))
        .route("/students/:id/check-in", post(students::check_in))
        .route("/students/:id/check-out", post(students::check_out))
        .route("/students/:id/qr-code", get(students::qr_code))
        .route("/students/:id/guardians", get(students::guardians))
        .route("/students/:id/attendance", get(students::attendance))
        .route("/students/:id/welcome", post(students::welcome))
}

fn teacher_routes() -> Router<AppState> {
    Router::new()
        .route("/teachers", get(teachers::index).post(teachers::store))
        .route(
            "/teachers/:id",
            get(teachers::show).put(teachers::update).delete(teachers::destroy),
        )
        .route("/teachers/restore/:id", put(teachers::restore))
        .route("/teachers/:id/check-in", post(teachers::check_in))
        .route("/teachers/:id/check-out", post(teachers::check_out))
        .route("/teachers/:id/qr-code", get(teachers::qr_code))
        .route("/teachers/:id/attendance", get(teachers::attendance))
        .route("/teachers/:id/welcome", post(teachers::welcome))
}

fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/attendance/checked-in", get(attendance::students_checked_in))
        .route("/attendance/checked-out", get(attendance::students_checked_out))
        .route("/teachers-attendance/checked-in", get(attendance::teachers_checked_in))
        .route("/teachers-attendance/checked-out", get(attendance::teachers_checked_out))
}
