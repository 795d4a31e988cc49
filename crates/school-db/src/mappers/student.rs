//! Student model -> entity mapper

use school_core::entities::Student;

use crate::models::StudentModel;

impl From<StudentModel> for Student {
    fn from(model: StudentModel) -> Self {
        Student {
            id: model.id,
            student_code: model.student_code,
            first_name: model.first_name,
            last_name: model.last_name,
            other_names: model.other_names,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
