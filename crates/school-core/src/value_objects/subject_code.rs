//! Subject code generation
//!
//! Codes are the human-facing identifiers printed on QR badges. The ordinal
//! is supplied by storage (a per-kind sequence) and the random suffix keeps
//! codes from being trivially guessable from a neighbour's badge.

use rand::Rng;

use super::SubjectType;

/// Build a subject code from a sequence ordinal.
///
/// - Students: `LS00000001-123`
/// - Teachers: `LS-00000001-12-T`
pub fn generate_subject_code(kind: SubjectType, ordinal: i64) -> String {
    let mut rng = rand::thread_rng();
    match kind {
        SubjectType::Student => format!("LS{ordinal:08}-{:03}", rng.gen_range(0..1000)),
        SubjectType::Teacher => format!("LS-{ordinal:08}-{:02}-T", rng.gen_range(0..100)),
    }
}
