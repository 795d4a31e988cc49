//! Attendance model -> entity mapper

use school_core::entities::AttendanceRecord;

use crate::models::AttendanceModel;

impl From<AttendanceModel> for AttendanceRecord {
    fn from(model: AttendanceModel) -> Self {
        AttendanceRecord {
            id: model.id,
            subject_id: model.subject_id,
            date: model.date,
            checkin_at: model.checkin_at,
            checkout_at: model.checkout_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
