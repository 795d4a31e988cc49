//! Soft-delete predicate shared by every person table

use school_core::traits::RecordScope;

/// SQL condition selecting the rows a [`RecordScope`] may see.
///
/// `alias` is the table alias (or table name) the condition applies to.
pub fn visible(scope: RecordScope, alias: &str) -> String {
    match scope {
        RecordScope::Active => format!("{alias}.deleted_at IS NULL"),
        RecordScope::WithDeleted => "TRUE".to_string(),
    }
}
