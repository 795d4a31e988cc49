//! Subject kinds - the two populations that keep attendance

use std::fmt;

use serde::{Deserialize, Serialize};

/// Runtime tag for the population a subject belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
    Student,
    Teacher,
}

impl SubjectType {
    /// Capitalized name used in user-facing messages
    pub const fn label(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Teacher => "Teacher",
        }
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compile-time marker selecting one attendance population.
///
/// Students and teachers share the same attendance rules but keep fully
/// independent storage, so ledgers and repositories are parameterized by a
/// kind instead of carrying a runtime flag.
pub trait SubjectKind: Send + Sync + 'static {
    const TYPE: SubjectType;
}

/// Marker for the student population
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StudentKind;

impl SubjectKind for StudentKind {
    const TYPE: SubjectType = SubjectType::Student;
}

/// Marker for the teacher population
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeacherKind;

impl SubjectKind for TeacherKind {
    const TYPE: SubjectType = SubjectType::Teacher;
}
