//! The module contains the errors the engine can throw.

use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// An id did not resolve within the caller's company. Deliberately the
    /// same error whether the row is missing or owned by another tenant.
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    /// Lifecycle conflict: the row exists but is not in the state the
    /// operation requires (re-approving a claim, re-receiving an order).
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// Journal entry whose debits and credits do not match.
    #[error("Unbalanced journal entry: {0}")]
    Unbalanced(String),
    #[error("Currency mismatch: {0}")]
    CurrencyMismatch(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::InvalidState(a), Self::InvalidState(b)) => a == b,
            (Self::Unbalanced(a), Self::Unbalanced(b)) => a == b,
            (Self::CurrencyMismatch(a), Self::CurrencyMismatch(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
