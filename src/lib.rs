//! Contact Book Server - a small HTTP service for managing contacts.
//!
//! Contacts have a name, an age and one or more phone numbers, and are kept in
//! SQLite. Every deletion is appended to a plain-text log.
//!
//! # Architecture
//!
//! - **domain**: Validated value types (IDs, phones, ages, drafts)
//! - **models**: The contact aggregate and row grouping
//! - **db**: Connection pool, schema migrations and transaction helpers
//! - **repositories**: The SQLite-backed contact store
//! - **services**: Validation, logging and deletion-log side effects
//! - **deletion_log**: Append-only record of deleted contacts
//! - **server**: Axum router and HTTP handlers
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables

pub mod config;
pub mod db;
pub mod deletion_log;
pub mod domain;
pub mod error;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;

pub use config::Config;
pub use deletion_log::{DeletionLog, DeletionRecord, FileDeletionLog, NoopDeletionLog};
pub use domain::{Age, AgeInput, ContactDraft, ContactId, PhoneNumber, ValidationError};
pub use error::{ConfigError, StoreError, StoreResult};
pub use models::{group_rows, Contact, ContactRow};
pub use repositories::{ContactRepository, SqliteContactRepository};
pub use server::{router, run_server, ApiError, AppState};
pub use services::{ContactService, ContactServiceImpl};
