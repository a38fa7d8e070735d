//! Error types for the contact book server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::{ContactId, ValidationError};
use thiserror::Error;

/// Errors that can occur in the contact store and the service on top of it.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Bad or missing input
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// No contact exists with the given ID
    #[error("Contact not found: {0}")]
    NotFound(ContactId),

    /// The store broke an invariant it is responsible for
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// SQLite reported an error; the enclosing transaction was rolled back
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// No connection could be checked out of the pool
    #[error("Connection pool error: {0}")]
    Pool(String),
}

impl StoreError {
    /// Whether this error was caused by caller input.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }

    /// Whether this error reports a missing contact.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(err: r2d2::Error) -> Self {
        StoreError::Pool(err.to_string())
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
