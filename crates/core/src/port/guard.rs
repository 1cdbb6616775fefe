// Argument guards shared by every DAO implementation
//
// All of these run before a statement is issued, so a failing guard never
// touches storage.

use crate::error::{AppError, Result};

/// Reject an insert of an entity that already carries an identity
pub fn ensure_unsaved(id: Option<i64>, entity: &str) -> Result<()> {
    match id {
        Some(id) => Err(AppError::Precondition(format!(
            "Trying to insert {} with non-null ID {}",
            entity, id
        ))),
        None => Ok(()),
    }
}

/// Unwrap a key that must be present for `action` on `entity`
pub fn require_key(key: Option<i64>, entity: &str, action: &str) -> Result<i64> {
    key.ok_or_else(|| {
        AppError::Precondition(format!("Trying to {} {} with null ID", action, entity))
    })
}

/// Unwrap a foreign key that must be present for `action` on `entity`
pub fn require_reference(key: Option<i64>, entity: &str, field: &str, action: &str) -> Result<i64> {
    key.ok_or_else(|| {
        AppError::Precondition(format!(
            "Trying to {} {} with null {}",
            action, entity, field
        ))
    })
}

/// Turn the optional row of a `SELECT COUNT(*)` into a count
pub fn expect_count(row: Option<i64>, table: &str) -> Result<i64> {
    row.ok_or_else(|| AppError::Aggregation(format!("No count returned for {}", table)))
}
