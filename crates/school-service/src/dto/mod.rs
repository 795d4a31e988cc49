//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers between domain entities and DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AttendanceQuery, CreateGuardianRequest, CreateStudentRequest, CreateTeacherRequest,
    CreateUserRequest, GuardianQuery, LoginRequest, RegisterRequest, StudentQuery, TeacherQuery,
    UpdateGuardianRequest, UpdateStudentRequest, UpdateTeacherRequest, UpdateUserRequest,
};

pub use responses::{
    AttendanceListResponse, AttendanceTimesResponse, DetailResponse, GuardianResponse,
    HealthChecks, HealthResponse, PingResponse, ReadinessResponse, StudentAttendanceResponse,
    StudentEnvelope, StudentHistoryResponse, StudentListResponse, StudentResponse,
    TeacherAttendanceResponse, TeacherEnvelope, TeacherHistoryResponse, TeacherListResponse,
    TeacherResponse, TokenResponse, UserResponse,
};
