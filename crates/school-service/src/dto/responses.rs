//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// `{"detail": "..."}` acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }
}

// ============================================================================
// Auth / User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Token issued on register and login
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

impl TokenResponse {
    pub fn bearer(access_token: String, expires_in: i64, user: UserResponse) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// Directory Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct GuardianResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub other_names: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub identification_document_type: Option<String>,
    pub identification_document_number: Option<String>,
    pub identification_document_expiry: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentResponse {
    pub id: i64,
    pub student_code: String,
    pub first_name: String,
    pub last_name: String,
    pub other_names: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeacherResponse {
    pub id: i64,
    pub teacher_code: String,
    pub first_name: String,
    pub last_name: String,
    pub other_names: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub identification_document_type: Option<String>,
    pub identification_document_number: Option<String>,
    pub identification_document_expiry: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct StudentListResponse {
    pub students: Vec<StudentResponse>,
}

#[derive(Debug, Serialize)]
pub struct StudentEnvelope {
    pub student: StudentResponse,
}

#[derive(Debug, Serialize)]
pub struct TeacherListResponse {
    pub teachers: Vec<TeacherResponse>,
}

#[derive(Debug, Serialize)]
pub struct TeacherEnvelope {
    pub teacher: TeacherResponse,
}

// ============================================================================
// Attendance Responses
// ============================================================================

/// Timestamps of one attendance record
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceTimesResponse {
    pub date: NaiveDate,
    pub checkin_at: Option<DateTime<Utc>>,
    pub checkout_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentAttendanceResponse {
    #[serde(flatten)]
    pub times: AttendanceTimesResponse,
    pub student: StudentResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeacherAttendanceResponse {
    #[serde(flatten)]
    pub times: AttendanceTimesResponse,
    pub teacher: TeacherResponse,
}

/// `{"attendance": [...]}`
#[derive(Debug, Serialize)]
pub struct AttendanceListResponse<T> {
    pub attendance: Vec<T>,
}

impl<T> AttendanceListResponse<T> {
    pub fn new(attendance: Vec<T>) -> Self {
        Self { attendance }
    }
}

/// One student's attendance history
#[derive(Debug, Serialize)]
pub struct StudentHistoryResponse {
    pub student: StudentResponse,
    pub attendance: Vec<AttendanceTimesResponse>,
}

/// One teacher's attendance history
#[derive(Debug, Serialize)]
pub struct TeacherHistoryResponse {
    pub teacher: TeacherResponse,
    pub attendance: Vec<AttendanceTimesResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// `GET /ping`
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub ping: &'static str,
    pub environment: String,
    pub testing: bool,
}

/// Liveness probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Readiness probe response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: &'static str,
    /// Absent when no Redis outbox is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<&'static str>,
}

impl ReadinessResponse {
    pub fn ready(database: bool, redis: Option<bool>) -> Self {
        let label = |ok: bool| if ok { "ok" } else { "unavailable" };
        let all_ok = database && redis.unwrap_or(true);

        Self {
            status: if all_ok { "ready" } else { "not_ready" },
            checks: HealthChecks {
                database: label(database),
                redis: redis.map(label),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
