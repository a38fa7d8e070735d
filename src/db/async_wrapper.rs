//! Async bridge for blocking SQLite work.
//!
//! SQLite calls block the calling thread, so every store operation runs inside
//! `tokio::task::spawn_blocking`. The pooled connection is checked out on the
//! blocking thread and returned to the pool when the closure finishes, on every
//! exit path.

use rusqlite::Connection;
use tracing::error;

use super::DbPool;
use crate::error::{StoreError, StoreResult};

/// Run `f` with one pooled connection on Tokio's blocking pool.
///
/// # Example
/// ```rust,no_run
/// # use contact_book_server::db::{initialize_memory_pool, with_connection};
/// # async fn example() -> contact_book_server::error::StoreResult<()> {
/// let pool = initialize_memory_pool()?;
///
/// let count: i64 = with_connection(&pool, |conn| {
///     let count = conn.query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
///     Ok(count)
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn with_connection<F, T>(pool: &DbPool, f: F) -> StoreResult<T>
where
    F: FnOnce(&mut Connection) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();

    tokio::task::spawn_blocking(move || -> StoreResult<T> {
        let mut conn = pool.get()?;
        f(&mut conn)
    })
    .await
    .map_err(|e| {
        error!("Blocking database task failed: {}", e);
        StoreError::Persistence(format!("Database task failed: {}", e))
    })?
}
