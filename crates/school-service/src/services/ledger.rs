//! Attendance ledger
//!
//! Enforces one check-in and one check-out per subject per calendar day.
//! One ledger exists per [`SubjectKind`]; the student and teacher ledgers
//! share these rules but never storage.
//!
//! Both transitions are single conditional statements against the store
//! (insert-if-absent and update-if-open), so two concurrent requests for the
//! same subject and day cannot both succeed.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use school_core::entities::AttendanceRecord;
use school_core::traits::{AttendanceFilter, AttendanceRepository};
use school_core::value_objects::{AttendanceAction, AttendanceState, SubjectKind};
use school_core::DomainError;
use tracing::{debug, error, info, instrument};

use super::error::ServiceResult;

pub struct AttendanceLedger<K: SubjectKind> {
    repo: Arc<dyn AttendanceRepository<K>>,
}

impl<K: SubjectKind> Clone for AttendanceLedger<K> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<K: SubjectKind> std::fmt::Debug for AttendanceLedger<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttendanceLedger")
            .field("kind", &K::TYPE)
            .finish_non_exhaustive()
    }
}

impl<K: SubjectKind> AttendanceLedger<K> {
    pub fn new(repo: Arc<dyn AttendanceRepository<K>>) -> Self {
        Self { repo }
    }

    /// Where the subject stands on the given day
    pub async fn state(&self, subject_id: i64, date: NaiveDate) -> ServiceResult<AttendanceState> {
        let record = self.repo.find(subject_id, date).await?;
        Ok(AttendanceState::of(record.as_ref()))
    }

    /// True when a record exists for the day, checked out or not
    pub async fn has_checked_in(&self, subject_id: i64, date: NaiveDate) -> ServiceResult<bool> {
        Ok(self.state(subject_id, date).await? != AttendanceState::Absent)
    }

    /// True while the subject is checked in and has not yet checked out
    pub async fn has_not_checked_out(&self, subject_id: i64, date: NaiveDate) -> ServiceResult<bool> {
        Ok(self.state(subject_id, date).await? == AttendanceState::CheckedIn)
    }

    /// Open the day's record.
    ///
    /// # Errors
    /// `AlreadyCheckedIn` when any record exists for the day, including one
    /// created by a concurrent request.
    #[instrument(skip(self), fields(kind = %K::TYPE))]
    pub async fn check_in(
        &self,
        subject_id: i64,
        date: NaiveDate,
        at: DateTime<Utc>,
    ) -> ServiceResult<AttendanceRecord> {
        match self.repo.insert_if_absent(subject_id, date, at).await? {
            Some(record) => {
                info!(subject_id, %date, "Checked in");
                Ok(record)
            }
            None => {
                debug!(subject_id, %date, "Check-in rejected, record exists");
                Err(DomainError::AlreadyCheckedIn(K::TYPE).into())
            }
        }
    }

    /// Close the day's record, returning the number of records updated.
    ///
    /// # Errors
    /// `NotCheckedIn` without a record for the day, `AlreadyCheckedOut` when
    /// the record is closed, and `AttendanceInvariant` if more than one
    /// record matched.
    #[instrument(skip(self), fields(kind = %K::TYPE))]
    pub async fn check_out(&self, subject_id: i64, date: NaiveDate, at: DateTime<Utc>) -> ServiceResult<u64> {
        let affected = self.repo.close_open(subject_id, date, at).await?;

        match affected {
            1 => {
                info!(subject_id, %date, "Checked out");
                Ok(affected)
            }
            0 => {
                let record = self.repo.find(subject_id, date).await?;
                let state = AttendanceState::of(record.as_ref());
                debug!(subject_id, %date, ?state, "Check-out rejected");

                // A record opened after the update ran still counts as absent here
                match state.transition(AttendanceAction::CheckOut, K::TYPE) {
                    Err(e) => Err(e.into()),
                    Ok(_) => Err(DomainError::NotCheckedIn(K::TYPE).into()),
                }
            }
            _ => {
                error!(
                    subject_id,
                    %date,
                    affected,
                    "Check-out matched more than one attendance record"
                );
                Err(DomainError::AttendanceInvariant {
                    kind: K::TYPE,
                    affected,
                }
                .into())
            }
        }
    }

    /// Records for a day
    pub async fn records_on(&self, date: NaiveDate, filter: AttendanceFilter) -> ServiceResult<Vec<AttendanceRecord>> {
        Ok(self.repo.list_on(date, filter).await?)
    }

    /// Every record of one subject, newest day first
    pub async fn history(&self, subject_id: i64) -> ServiceResult<Vec<AttendanceRecord>> {
        Ok(self.repo.history(subject_id).await?)
    }
}
