//! In-memory repositories and helpers for service tests
//!
//! Each fake keeps its rows behind a `parking_lot::Mutex`, so conditional
//! writes (insert-if-absent, update-if-open) are atomic the same way the
//! PostgreSQL statements are.

#![allow(dead_code)]

use std::marker::PhantomData;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use parking_lot::Mutex;
use school_common::JwtService;
use school_core::entities::{
    AttendanceRecord, Guardian, GuardianChanges, NewGuardian, NewStudent, NewTeacher, NewUser,
    Student, StudentChanges, Teacher, TeacherChanges, User, UserChanges,
};
use school_core::events::Notification;
use school_core::traits::{
    AttendanceFilter, AttendanceRepository, GuardianRepository, NotificationGateway, RecordScope,
    RepoResult, StudentRepository, TeacherRepository, UserRepository,
};
use school_core::value_objects::{StudentKind, SubjectKind, SubjectType, TeacherKind};
use school_core::DomainError;
use school_service::{Clock, ServiceContext};

fn visible(deleted_at: Option<DateTime<Utc>>, scope: RecordScope) -> bool {
    scope.includes_deleted() || deleted_at.is_none()
}

fn next(seq: &AtomicI64) -> i64 {
    seq.fetch_add(1, Ordering::SeqCst) + 1
}

// ============================================================================
// Guardians
// ============================================================================

#[derive(Default)]
pub struct InMemoryGuardians {
    rows: Mutex<Vec<Guardian>>,
    seq: AtomicI64,
}

#[async_trait]
impl GuardianRepository for InMemoryGuardians {
    async fn find_by_id(&self, id: i64, scope: RecordScope) -> RepoResult<Option<Guardian>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|g| g.id == id && visible(g.deleted_at, scope))
            .cloned())
    }

    async fn find_by_phone_suffix(&self, suffix: &str) -> RepoResult<Vec<Guardian>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|g| g.deleted_at.is_none() && Guardian::phone_suffix(&g.phone) == suffix)
            .cloned()
            .collect())
    }

    async fn list(&self) -> RepoResult<Vec<Guardian>> {
        Ok(self.rows.lock().iter().filter(|g| g.deleted_at.is_none()).cloned().collect())
    }

    async fn create(&self, guardian: &NewGuardian) -> RepoResult<Guardian> {
        let mut rows = self.rows.lock();
        if rows.iter().any(|g| g.phone == guardian.phone) {
            return Err(DomainError::PhoneAlreadyExists);
        }
        let now = Utc::now();
        let row = Guardian {
            id: next(&self.seq),
            first_name: guardian.first_name.clone(),
            last_name: guardian.last_name.clone(),
            other_names: guardian.other_names.clone(),
            email: guardian.email.clone(),
            phone: guardian.phone.clone(),
            identification: guardian.identification.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, changes: &GuardianChanges) -> RepoResult<Guardian> {
        let mut rows = self.rows.lock();
        let row = rows
            .iter_mut()
            .find(|g| g.id == id && g.deleted_at.is_none())
            .ok_or(DomainError::GuardianNotFound)?;
        if let Some(v) = &changes.first_name {
            row.first_name.clone_from(v);
        }
        if let Some(v) = &changes.last_name {
            row.last_name.clone_from(v);
        }
        if let Some(v) = &changes.phone {
            row.phone.clone_from(v);
        }
        if changes.email.is_some() {
            row.email.clone_from(&changes.email);
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        let row = rows
            .iter_mut()
            .find(|g| g.id == id && g.deleted_at.is_none())
            .ok_or(DomainError::GuardianNotFound)?;
        row.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn restore(&self, id: i64) -> RepoResult<Guardian> {
        let mut rows = self.rows.lock();
        let row = rows.iter_mut().find(|g| g.id == id).ok_or(DomainError::GuardianNotFound)?;
        row.deleted_at = None;
        Ok(row.clone())
    }
}

// ============================================================================
// Students
// ============================================================================

pub struct InMemoryStudents {
    rows: Mutex<Vec<Student>>,
    links: Mutex<Vec<(i64, i64)>>,
    seq: AtomicI64,
    code_seq: AtomicI64,
    guardians: Arc<InMemoryGuardians>,
}

impl InMemoryStudents {
    pub fn new(guardians: Arc<InMemoryGuardians>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            links: Mutex::new(Vec::new()),
            seq: AtomicI64::new(0),
            code_seq: AtomicI64::new(0),
            guardians,
        }
    }

    async fn link(&self, student_id: i64, guardian_ids: &[i64]) -> RepoResult<()> {
        for &guardian_id in guardian_ids {
            let exists = self
                .guardians
                .find_by_id(guardian_id, RecordScope::Active)
                .await?
                .is_some();
            let mut links = self.links.lock();
            if exists && !links.contains(&(student_id, guardian_id)) {
                links.push((student_id, guardian_id));
            }
        }
        Ok(())
    }
}

fn student_not_found() -> DomainError {
    DomainError::SubjectNotFound(SubjectType::Student)
}

#[async_trait]
impl StudentRepository for InMemoryStudents {
    async fn find_by_id(&self, id: i64, scope: RecordScope) -> RepoResult<Option<Student>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|s| s.id == id && visible(s.deleted_at, scope))
            .cloned())
    }

    async fn find_by_code(&self, code: &str, scope: RecordScope) -> RepoResult<Option<Student>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|s| s.student_code == code && visible(s.deleted_at, scope))
            .cloned())
    }

    async fn find_many(&self, ids: &[i64], scope: RecordScope) -> RepoResult<Vec<Student>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|s| ids.contains(&s.id) && visible(s.deleted_at, scope))
            .cloned()
            .collect())
    }

    async fn list(&self) -> RepoResult<Vec<Student>> {
        Ok(self.rows.lock().iter().filter(|s| s.deleted_at.is_none()).cloned().collect())
    }

    async fn next_code_ordinal(&self) -> RepoResult<i64> {
        Ok(next(&self.code_seq))
    }

    async fn create(&self, student: &NewStudent, guardian_ids: &[i64]) -> RepoResult<Student> {
        let now = Utc::now();
        let row = Student {
            id: next(&self.seq),
            student_code: student.student_code.clone(),
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            other_names: student.other_names.clone(),
            email: student.email.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.rows.lock().push(row.clone());
        self.link(row.id, guardian_ids).await?;
        Ok(row)
    }

    async fn update(&self, id: i64, changes: &StudentChanges) -> RepoResult<Student> {
        let mut rows = self.rows.lock();
        let row = rows
            .iter_mut()
            .find(|s| s.id == id && s.deleted_at.is_none())
            .ok_or_else(student_not_found)?;
        if let Some(v) = &changes.first_name {
            row.first_name.clone_from(v);
        }
        if let Some(v) = &changes.last_name {
            row.last_name.clone_from(v);
        }
        if changes.other_names.is_some() {
            row.other_names.clone_from(&changes.other_names);
        }
        if changes.email.is_some() {
            row.email.clone_from(&changes.email);
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn add_guardians(&self, id: i64, guardian_ids: &[i64]) -> RepoResult<()> {
        self.link(id, guardian_ids).await
    }

    async fn guardians(&self, id: i64) -> RepoResult<Vec<Guardian>> {
        let linked: Vec<i64> = self
            .links
            .lock()
            .iter()
            .filter(|(student_id, _)| *student_id == id)
            .map(|(_, guardian_id)| *guardian_id)
            .collect();

        let mut guardians = Vec::new();
        for guardian_id in linked {
            if let Some(g) = self.guardians.find_by_id(guardian_id, RecordScope::Active).await? {
                guardians.push(g);
            }
        }
        Ok(guardians)
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        let row = rows
            .iter_mut()
            .find(|s| s.id == id && s.deleted_at.is_none())
            .ok_or_else(student_not_found)?;
        row.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn restore(&self, id: i64) -> RepoResult<Student> {
        let mut rows = self.rows.lock();
        let row = rows.iter_mut().find(|s| s.id == id).ok_or_else(student_not_found)?;
        row.deleted_at = None;
        Ok(row.clone())
    }
}

// ============================================================================
// Teachers
// ============================================================================

#[derive(Default)]
pub struct InMemoryTeachers {
    rows: Mutex<Vec<Teacher>>,
    seq: AtomicI64,
    code_seq: AtomicI64,
}

fn teacher_not_found() -> DomainError {
    DomainError::SubjectNotFound(SubjectType::Teacher)
}

#[async_trait]
impl TeacherRepository for InMemoryTeachers {
    async fn find_by_id(&self, id: i64, scope: RecordScope) -> RepoResult<Option<Teacher>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|t| t.id == id && visible(t.deleted_at, scope))
            .cloned())
    }

    async fn find_by_code(&self, code: &str, scope: RecordScope) -> RepoResult<Option<Teacher>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|t| t.teacher_code == code && visible(t.deleted_at, scope))
            .cloned())
    }

    async fn find_many(&self, ids: &[i64], scope: RecordScope) -> RepoResult<Vec<Teacher>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|t| ids.contains(&t.id) && visible(t.deleted_at, scope))
            .cloned()
            .collect())
    }

    async fn list(&self) -> RepoResult<Vec<Teacher>> {
        Ok(self.rows.lock().iter().filter(|t| t.deleted_at.is_none()).cloned().collect())
    }

    async fn next_code_ordinal(&self) -> RepoResult<i64> {
        Ok(next(&self.code_seq))
    }

    async fn create(&self, teacher: &NewTeacher) -> RepoResult<Teacher> {
        let mut rows = self.rows.lock();
        if rows.iter().any(|t| t.phone == teacher.phone) {
            return Err(DomainError::PhoneAlreadyExists);
        }
        let now = Utc::now();
        let row = Teacher {
            id: next(&self.seq),
            teacher_code: teacher.teacher_code.clone(),
            first_name: teacher.first_name.clone(),
            last_name: teacher.last_name.clone(),
            other_names: teacher.other_names.clone(),
            email: teacher.email.clone(),
            phone: teacher.phone.clone(),
            identification: teacher.identification.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, changes: &TeacherChanges) -> RepoResult<Teacher> {
        let mut rows = self.rows.lock();
        let row = rows
            .iter_mut()
            .find(|t| t.id == id && t.deleted_at.is_none())
            .ok_or_else(teacher_not_found)?;
        if let Some(v) = &changes.first_name {
            row.first_name.clone_from(v);
        }
        if let Some(v) = &changes.phone {
            row.phone.clone_from(v);
        }
        if changes.email.is_some() {
            row.email.clone_from(&changes.email);
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        let row = rows
            .iter_mut()
            .find(|t| t.id == id && t.deleted_at.is_none())
            .ok_or_else(teacher_not_found)?;
        row.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn restore(&self, id: i64) -> RepoResult<Teacher> {
        let mut rows = self.rows.lock();
        let row = rows.iter_mut().find(|t| t.id == id).ok_or_else(teacher_not_found)?;
        row.deleted_at = None;
        Ok(row.clone())
    }
}

// ============================================================================
// Users
// ============================================================================

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<(User, String)>>,
    seq: AtomicI64,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: i64, scope: RecordScope) -> RepoResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|(u, _)| u.id == id && visible(u.deleted_at, scope))
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str, scope: RecordScope) -> RepoResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|(u, _)| u.email == email && visible(u.deleted_at, scope))
            .map(|(u, _)| u.clone()))
    }

    async fn list(&self) -> RepoResult<Vec<User>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|(u, _)| u.deleted_at.is_none())
            .map(|(u, _)| u.clone())
            .collect())
    }

    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let mut rows = self.rows.lock();
        if rows.iter().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        let now = Utc::now();
        let row = User {
            id: next(&self.seq),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        rows.push((row.clone(), user.password_hash.clone()));
        Ok(row)
    }

    async fn update(&self, id: i64, changes: &UserChanges) -> RepoResult<User> {
        let mut rows = self.rows.lock();
        let (row, hash) = rows
            .iter_mut()
            .find(|(u, _)| u.id == id && u.deleted_at.is_none())
            .ok_or(DomainError::UserNotFound)?;
        if let Some(v) = &changes.name {
            row.name.clone_from(v);
        }
        if let Some(v) = &changes.email {
            row.email.clone_from(v);
        }
        if let Some(v) = &changes.password_hash {
            hash.clone_from(v);
        }
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        let (row, _) = rows
            .iter_mut()
            .find(|(u, _)| u.id == id && u.deleted_at.is_none())
            .ok_or(DomainError::UserNotFound)?;
        row.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn restore(&self, id: i64) -> RepoResult<User> {
        let mut rows = self.rows.lock();
        let (row, _) = rows.iter_mut().find(|(u, _)| u.id == id).ok_or(DomainError::UserNotFound)?;
        row.deleted_at = None;
        Ok(row.clone())
    }

    async fn get_password_hash(&self, email: &str) -> RepoResult<Option<String>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|(u, _)| u.email == email && u.deleted_at.is_none())
            .map(|(_, hash)| hash.clone()))
    }
}

// ============================================================================
// Attendance
// ============================================================================

pub struct InMemoryAttendance<K> {
    rows: Mutex<Vec<AttendanceRecord>>,
    seq: AtomicI64,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Default for InMemoryAttendance<K> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            seq: AtomicI64::new(0),
            _kind: PhantomData,
        }
    }
}

impl<K> InMemoryAttendance<K> {
    pub fn records(&self) -> Vec<AttendanceRecord> {
        self.rows.lock().clone()
    }

    /// Insert without the one-per-day check, to simulate a corrupted store
    pub fn insert_unchecked(&self, subject_id: i64, date: NaiveDate, at: DateTime<Utc>) {
        let id = next(&self.seq);
        self.rows.lock().push(AttendanceRecord {
            id,
            subject_id,
            date,
            checkin_at: Some(at),
            checkout_at: None,
            created_at: at,
            updated_at: at,
        });
    }
}

#[async_trait]
impl<K: SubjectKind> AttendanceRepository<K> for InMemoryAttendance<K> {
    async fn find(&self, subject_id: i64, date: NaiveDate) -> RepoResult<Option<AttendanceRecord>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|r| r.subject_id == subject_id && r.date == date)
            .cloned())
    }

    async fn insert_if_absent(
        &self,
        subject_id: i64,
        date: NaiveDate,
        at: DateTime<Utc>,
    ) -> RepoResult<Option<AttendanceRecord>> {
        let mut rows = self.rows.lock();
        if rows.iter().any(|r| r.subject_id == subject_id && r.date == date) {
            return Ok(None);
        }
        let record = AttendanceRecord {
            id: next(&self.seq),
            subject_id,
            date,
            checkin_at: Some(at),
            checkout_at: None,
            created_at: at,
            updated_at: at,
        };
        rows.push(record.clone());
        Ok(Some(record))
    }

    async fn close_open(&self, subject_id: i64, date: NaiveDate, at: DateTime<Utc>) -> RepoResult<u64> {
        let mut affected = 0;
        for record in self
            .rows
            .lock()
            .iter_mut()
            .filter(|r| r.subject_id == subject_id && r.date == date && r.is_open())
        {
            record.checkout_at = Some(at);
            record.updated_at = at;
            affected += 1;
        }
        Ok(affected)
    }

    async fn list_on(&self, date: NaiveDate, filter: AttendanceFilter) -> RepoResult<Vec<AttendanceRecord>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|r| {
                r.date == date
                    && match filter {
                        AttendanceFilter::CheckedIn => r.checkin_at.is_some(),
                        AttendanceFilter::CheckedOut => r.checkout_at.is_some(),
                    }
            })
            .cloned()
            .collect())
    }

    async fn history(&self, subject_id: i64) -> RepoResult<Vec<AttendanceRecord>> {
        let mut records: Vec<AttendanceRecord> = self
            .rows
            .lock()
            .iter()
            .filter(|r| r.subject_id == subject_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }
}

// ============================================================================
// Notifications and clock
// ============================================================================

/// Gateway that keeps every notification it receives
#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<Notification>>,
    fail: bool,
}

impl RecordingGateway {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().clone()
    }

    /// Wait for the spawned dispatch tasks to deliver `count` notifications
    pub async fn wait_for(&self, count: usize) -> Vec<Notification> {
        for _ in 0..200 {
            if self.sent.lock().len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.sent()
    }
}

#[async_trait]
impl NotificationGateway for RecordingGateway {
    async fn notify(&self, notification: &Notification) -> RepoResult<()> {
        self.sent.lock().push(notification.clone());
        if self.fail {
            return Err(DomainError::NotificationError("mailer offline".to_string()));
        }
        Ok(())
    }
}

/// Clock pinned to a settable instant
pub struct FixedClock(Mutex<DateTime<Local>>);

impl FixedClock {
    pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Self {
        Self(Mutex::new(local(y, m, d, h, min)))
    }

    pub fn set(&self, at: DateTime<Local>) {
        *self.0.lock() = at;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        *self.0.lock()
    }
}

pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("unambiguous local time")
}

// ============================================================================
// Harness
// ============================================================================

pub struct Harness {
    pub ctx: ServiceContext,
    pub guardians: Arc<InMemoryGuardians>,
    pub students: Arc<InMemoryStudents>,
    pub teachers: Arc<InMemoryTeachers>,
    pub users: Arc<InMemoryUsers>,
    pub student_attendance: Arc<InMemoryAttendance<StudentKind>>,
    pub teacher_attendance: Arc<InMemoryAttendance<TeacherKind>>,
    pub notifier: Arc<RecordingGateway>,
    pub clock: Arc<FixedClock>,
}

pub const TEST_SECRET: &str = "test-secret-key-that-is-long-enough";

impl Harness {
    pub fn new() -> Self {
        Self::with_gateway(RecordingGateway::default())
    }

    pub fn with_gateway(gateway: RecordingGateway) -> Self {
        let guardians = Arc::new(InMemoryGuardians::default());
        let students = Arc::new(InMemoryStudents::new(Arc::clone(&guardians)));
        let teachers = Arc::new(InMemoryTeachers::default());
        let users = Arc::new(InMemoryUsers::default());
        let student_attendance = Arc::new(InMemoryAttendance::<StudentKind>::default());
        let teacher_attendance = Arc::new(InMemoryAttendance::<TeacherKind>::default());
        let notifier = Arc::new(gateway);
        let clock = Arc::new(FixedClock::at(2024, 1, 10, 9, 0));

        let ctx = ServiceContext::builder()
            .guardian_repo(guardians.clone())
            .student_repo(students.clone())
            .teacher_repo(teachers.clone())
            .user_repo(users.clone())
            .student_attendance(student_attendance.clone())
            .teacher_attendance(teacher_attendance.clone())
            .notifier(notifier.clone())
            .jwt_service(Arc::new(JwtService::new(TEST_SECRET, 1800)))
            .clock(clock.clone())
            .build()
            .expect("all dependencies provided");

        Self {
            ctx,
            guardians,
            students,
            teachers,
            users,
            student_attendance,
            teacher_attendance,
            notifier,
            clock,
        }
    }
}
