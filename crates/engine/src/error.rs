//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when an item is not found (or belongs to another
//!   user).
//! - [`InvalidAmount`], [`InvalidName`] and [`InvalidRange`] thrown when a
//!   command or a filter fails validation.
//! - [`InvalidInput`] thrown for malformed requests and stored values that
//!   are none of the above.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidName`]: EngineError::InvalidName
//!  [`InvalidRange`]: EngineError::InvalidRange
//!  [`InvalidInput`]: EngineError::InvalidInput
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidRange(a), Self::InvalidRange(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::InvalidCursor(a), Self::InvalidCursor(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
