//! Test fixtures and request/response shapes for the HTTP surface

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::helpers::{assert_json, TestServer};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Process-unique number for emails and phone numbers
pub fn unique() -> u64 {
    let micros = chrono::Utc::now().timestamp_micros() as u64;
    micros.wrapping_mul(1000) + COUNTER.fetch_add(1, Ordering::SeqCst) % 1000
}

/// Nine distinct trailing digits, the part guardian search matches on
pub fn unique_local_digits() -> String {
    format!("{:09}", unique() % 1_000_000_000)
}

pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}_{}@school.test", unique())
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        Self {
            name: "Office Admin".to_string(),
            email: unique_email("admin"),
            password: "attendance123".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct CreateGuardianRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
}

impl CreateGuardianRequest {
    /// Guardian with a unique `+233` number; returns the local digits too
    pub fn unique() -> (Self, String) {
        let digits = unique_local_digits();
        let request = Self {
            first_name: "Abena".to_string(),
            last_name: "Owusu".to_string(),
            phone: format!("+233{digits}"),
            email: Some(unique_email("guardian")),
        };
        (request, digits)
    }
}

#[derive(Debug, Serialize)]
pub struct CreateStudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub other_names: Option<String>,
    pub email: Option<String>,
    pub guardians: Option<Vec<i64>>,
}

impl CreateStudentRequest {
    pub fn with_guardians(guardians: Vec<i64>) -> Self {
        Self {
            first_name: "Esi".to_string(),
            last_name: "Owusu".to_string(),
            other_names: Some("Adjoa".to_string()),
            email: None,
            guardians: Some(guardians),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateTeacherRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
}

impl CreateTeacherRequest {
    pub fn unique() -> Self {
        Self {
            first_name: "Kwame".to_string(),
            last_name: "Mensah".to_string(),
            phone: format!("0{}", unique_local_digits()),
            email: Some(unique_email("teacher")),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
    pub code: String,
    #[serde(default)]
    pub errors: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct GuardianResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudentResponse {
    pub id: i64,
    pub student_code: String,
    pub first_name: String,
    pub last_name: String,
    pub other_names: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StudentEnvelope {
    pub student: StudentResponse,
}

#[derive(Debug, Deserialize)]
pub struct StudentListResponse {
    pub students: Vec<StudentResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeacherResponse {
    pub id: i64,
    pub teacher_code: String,
    pub first_name: String,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct TeacherEnvelope {
    pub teacher: TeacherResponse,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceTimes {
    pub date: String,
    pub checkin_at: Option<String>,
    pub checkout_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StudentAttendanceEntry {
    #[serde(flatten)]
    pub times: AttendanceTimes,
    pub student: StudentResponse,
}

#[derive(Debug, Deserialize)]
pub struct TeacherAttendanceEntry {
    #[serde(flatten)]
    pub times: AttendanceTimes,
    pub teacher: TeacherResponse,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceList<T> {
    pub attendance: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct StudentHistory {
    pub student: StudentResponse,
    pub attendance: Vec<AttendanceTimes>,
}

// ============================================================================
// Composite fixtures
// ============================================================================

/// Register a fresh account and return its token
pub async fn register_admin(server: &TestServer) -> Result<TokenResponse> {
    let response = server.post("/auth/register", &RegisterRequest::unique()).await?;
    assert_json(response, StatusCode::CREATED).await
}

pub async fn create_guardian(server: &TestServer, token: &str) -> Result<(GuardianResponse, String)> {
    let (request, digits) = CreateGuardianRequest::unique();
    let response = server.post_auth("/guardians", token, &request).await?;
    let guardian = assert_json(response, StatusCode::CREATED).await?;
    Ok((guardian, digits))
}

pub async fn create_student(server: &TestServer, token: &str, guardians: Vec<i64>) -> Result<StudentResponse> {
    let response = server
        .post_auth("/students", token, &CreateStudentRequest::with_guardians(guardians))
        .await?;
    let envelope: StudentEnvelope = assert_json(response, StatusCode::CREATED).await?;
    Ok(envelope.student)
}

pub async fn create_teacher(server: &TestServer, token: &str) -> Result<TeacherResponse> {
    let response = server
        .post_auth("/teachers", token, &CreateTeacherRequest::unique())
        .await?;
    let envelope: TeacherEnvelope = assert_json(response, StatusCode::CREATED).await?;
    Ok(envelope.teacher)
}
