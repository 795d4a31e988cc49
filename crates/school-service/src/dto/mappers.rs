//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs and
//! from request DTOs to domain inputs.

use school_core::entities::{
    AttendanceRecord, Guardian, GuardianChanges, IdentityDocument, NewGuardian, Student,
    StudentChanges, Teacher, TeacherChanges, User,
};

use super::requests::{
    CreateGuardianRequest, UpdateGuardianRequest, UpdateStudentRequest, UpdateTeacherRequest,
};
use super::responses::{
    AttendanceTimesResponse, GuardianResponse, StudentResponse, TeacherResponse, UserResponse,
};

// ============================================================================
// Entity -> Response
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl From<&Guardian> for GuardianResponse {
    fn from(guardian: &Guardian) -> Self {
        Self {
            id: guardian.id,
            first_name: guardian.first_name.clone(),
            last_name: guardian.last_name.clone(),
            other_names: guardian.other_names.clone(),
            phone: guardian.phone.clone(),
            email: guardian.email.clone(),
            identification_document_type: guardian.identification.document_type.clone(),
            identification_document_number: guardian.identification.document_number.clone(),
            identification_document_expiry: guardian.identification.document_expiry,
        }
    }
}

impl From<Guardian> for GuardianResponse {
    fn from(guardian: Guardian) -> Self {
        Self::from(&guardian)
    }
}

impl From<&Student> for StudentResponse {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            student_code: student.student_code.clone(),
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            other_names: student.other_names.clone(),
            email: student.email.clone(),
        }
    }
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self::from(&student)
    }
}

impl From<&Teacher> for TeacherResponse {
    fn from(teacher: &Teacher) -> Self {
        Self {
            id: teacher.id,
            teacher_code: teacher.teacher_code.clone(),
            first_name: teacher.first_name.clone(),
            last_name: teacher.last_name.clone(),
            other_names: teacher.other_names.clone(),
            phone: teacher.phone.clone(),
            email: teacher.email.clone(),
            identification_document_type: teacher.identification.document_type.clone(),
            identification_document_number: teacher.identification.document_number.clone(),
            identification_document_expiry: teacher.identification.document_expiry,
        }
    }
}

impl From<Teacher> for TeacherResponse {
    fn from(teacher: Teacher) -> Self {
        Self::from(&teacher)
    }
}

impl From<&AttendanceRecord> for AttendanceTimesResponse {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            date: record.date,
            checkin_at: record.checkin_at,
            checkout_at: record.checkout_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

// ============================================================================
// Request -> Domain input
// ============================================================================

fn identity(
    document_type: Option<String>,
    document_number: Option<String>,
    document_expiry: Option<chrono::NaiveDate>,
) -> IdentityDocument {
    IdentityDocument {
        document_type,
        document_number,
        document_expiry,
    }
}

impl From<CreateGuardianRequest> for NewGuardian {
    fn from(request: CreateGuardianRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            other_names: request.other_names,
            email: request.email,
            phone: request.phone,
            identification: identity(
                request.identification_document_type,
                request.identification_document_number,
                request.identification_document_expiry,
            ),
        }
    }
}

impl From<UpdateGuardianRequest> for GuardianChanges {
    fn from(request: UpdateGuardianRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            other_names: request.other_names,
            email: request.email,
            phone: request.phone,
            identification: identity(
                request.identification_document_type,
                request.identification_document_number,
                request.identification_document_expiry,
            ),
        }
    }
}

impl From<&UpdateStudentRequest> for StudentChanges {
    fn from(request: &UpdateStudentRequest) -> Self {
        Self {
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            other_names: request.other_names.clone(),
            email: request.email.clone(),
        }
    }
}

impl From<UpdateTeacherRequest> for TeacherChanges {
    fn from(request: UpdateTeacherRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            other_names: request.other_names,
            email: request.email,
            phone: request.phone,
            identification: identity(
                request.identification_document_type,
                request.identification_document_number,
                request.identification_document_expiry,
            ),
        }
    }
}
