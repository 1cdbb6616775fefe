// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
///
/// Every data-access and service call returns this. Services never translate
/// one kind into another: a storage failure inside a unit of work reaches the
/// caller as `Storage`, a missing identity as `Precondition`, and so on.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid argument: absent or already-assigned identity, missing foreign key.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// A cross-entity invariant would be violated.
    #[error("Business rule violated: {0}")]
    BusinessRule(String),

    /// A single-row aggregate query returned no row.
    #[error("Aggregation error: {0}")]
    Aggregation(String),

    /// Failure surfaced by the underlying store.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn is_precondition(&self) -> bool {
        matches!(self, AppError::Precondition(_))
    }

    pub fn is_business_rule(&self) -> bool {
        matches!(self, AppError::BusinessRule(_))
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, AppError::Storage(_))
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// Note: sqlx::Error conversion is handled in infra-sqlite crate
// by converting to AppError::Storage(String)
