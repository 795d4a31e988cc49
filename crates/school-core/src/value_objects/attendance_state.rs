//! Attendance state machine for one subject on one calendar day

use crate::entities::AttendanceRecord;
use crate::error::DomainError;

use super::SubjectType;

/// Where a subject stands for a given day.
///
/// Transitions are forward-only: `Absent -> CheckedIn -> CheckedOut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceState {
    Absent,
    CheckedIn,
    CheckedOut,
}

/// The two actions a subject can take on a day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceAction {
    CheckIn,
    CheckOut,
}

impl AttendanceState {
    /// Derive the state from the (at most one) record stored for the day
    pub fn of(record: Option<&AttendanceRecord>) -> Self {
        match record {
            None => Self::Absent,
            Some(r) if r.checkout_at.is_some() => Self::CheckedOut,
            Some(_) => Self::CheckedIn,
        }
    }

    /// Apply an action, returning the next state or the rejection for it
    pub fn transition(self, action: AttendanceAction, kind: SubjectType) -> Result<Self, DomainError> {
        match (self, action) {
            (Self::Absent, AttendanceAction::CheckIn) => Ok(Self::CheckedIn),
            (Self::CheckedIn | Self::CheckedOut, AttendanceAction::CheckIn) => {
                Err(DomainError::AlreadyCheckedIn(kind))
            }
            (Self::Absent, AttendanceAction::CheckOut) => Err(DomainError::NotCheckedIn(kind)),
            (Self::CheckedIn, AttendanceAction::CheckOut) => Ok(Self::CheckedOut),
            (Self::CheckedOut, AttendanceAction::CheckOut) => {
                Err(DomainError::AlreadyCheckedOut(kind))
            }
        }
    }
}
