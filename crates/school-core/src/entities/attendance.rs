//! Attendance record - one row per subject per calendar day

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::AttendanceState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub id: i64,
    pub subject_id: i64,
    pub date: NaiveDate,
    pub checkin_at: Option<DateTime<Utc>>,
    pub checkout_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttendanceRecord {
    #[inline]
    pub fn state(&self) -> AttendanceState {
        AttendanceState::of(Some(self))
    }

    /// Still on the premises: checked in and not yet checked out
    #[inline]
    pub fn is_open(&self) -> bool {
        self.checkin_at.is_some() && self.checkout_at.is_none()
    }
}
