//! SQLite storage plumbing.
//!
//! This module provides:
//! - Connection pooling (r2d2-sqlite) with per-connection pragmas
//! - Idempotent schema bootstrap
//! - A transaction helper with automatic rollback
//! - An async bridge that runs blocking SQLite work off the runtime threads

pub mod async_wrapper;
pub mod connection;
pub mod migrations;
pub mod transactions;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

pub use async_wrapper::with_connection;
pub use connection::{initialize_memory_pool, initialize_pool};
pub use migrations::{migrate_to_latest, SCHEMA_VERSION};
pub use transactions::execute_in_transaction;

/// Pool of SQLite connections shared by the store.
pub type DbPool = Pool<SqliteConnectionManager>;
