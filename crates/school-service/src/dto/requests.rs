//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Update requests are partial: absent fields keep their stored value.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Account registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Login request; the username is the account email
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// User Requests
// ============================================================================

pub type CreateUserRequest = RegisterRequest;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: Option<String>,
}

// ============================================================================
// Guardian Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGuardianRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,

    #[validate(length(max = 255, message = "Other names must be at most 255 characters"))]
    pub other_names: Option<String>,

    #[validate(length(min = 7, max = 20, message = "Phone must be 7-20 characters"))]
    pub phone: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub identification_document_type: Option<String>,
    pub identification_document_number: Option<String>,
    pub identification_document_expiry: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGuardianRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: Option<String>,

    #[validate(length(max = 255, message = "Other names must be at most 255 characters"))]
    pub other_names: Option<String>,

    #[validate(length(min = 7, max = 20, message = "Phone must be 7-20 characters"))]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub identification_document_type: Option<String>,
    pub identification_document_number: Option<String>,
    pub identification_document_expiry: Option<NaiveDate>,
}

/// `GET /guardians?phone=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuardianQuery {
    pub phone: Option<String>,
}

// ============================================================================
// Student Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,

    #[validate(length(max = 255, message = "Other names must be at most 255 characters"))]
    pub other_names: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// Guardian ids to link; unknown ids are ignored
    #[serde(default)]
    pub guardians: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStudentRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: Option<String>,

    #[validate(length(max = 255, message = "Other names must be at most 255 characters"))]
    pub other_names: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// Additional guardians; existing links are kept
    #[serde(default)]
    pub guardians: Option<Vec<i64>>,
}

/// `GET /students?student_code=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentQuery {
    pub student_code: Option<String>,
}

// ============================================================================
// Teacher Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTeacherRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,

    #[validate(length(max = 255, message = "Other names must be at most 255 characters"))]
    pub other_names: Option<String>,

    #[validate(length(min = 7, max = 20, message = "Phone must be 7-20 characters"))]
    pub phone: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub identification_document_type: Option<String>,
    pub identification_document_number: Option<String>,
    pub identification_document_expiry: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTeacherRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: Option<String>,

    #[validate(length(max = 255, message = "Other names must be at most 255 characters"))]
    pub other_names: Option<String>,

    #[validate(length(min = 7, max = 20, message = "Phone must be 7-20 characters"))]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub identification_document_type: Option<String>,
    pub identification_document_number: Option<String>,
    pub identification_document_expiry: Option<NaiveDate>,
}

/// `GET /teachers?teacher_code=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeacherQuery {
    pub teacher_code: Option<String>,
}

// ============================================================================
// Attendance Requests
// ============================================================================

/// `?date=YYYY-MM-DD`, today when omitted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceQuery {
    pub date: Option<NaiveDate>,
}
