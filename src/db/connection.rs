//! Connection pooling and pragma configuration

use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use super::DbPool;
use crate::error::StoreResult;

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a file-backed pool of at most `pool_size` connections.
///
/// Every connection enforces foreign keys and waits up to [`BUSY_TIMEOUT`] on
/// locks. The database is switched to WAL so readers do not block the writer.
pub fn initialize_pool(db_path: &Path, pool_size: u32) -> StoreResult<DbPool> {
    let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
        apply_pragmas(conn)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
            row.get::<_, String>(0)
        })?;
        Ok(())
    });

    let pool = r2d2::Pool::builder().max_size(pool_size).build(manager)?;
    debug!(path = %db_path.display(), pool_size, "SQLite pool ready");
    Ok(pool)
}

/// Open a single-connection in-memory pool.
///
/// Each in-memory connection is its own database, so the pool is capped at one
/// connection and never expires or health-checks it: a replacement would start
/// out empty. Useful for tests and throwaway runs.
pub fn initialize_memory_pool() -> StoreResult<DbPool> {
    let manager = SqliteConnectionManager::memory().with_init(apply_pragmas);

    let pool = r2d2::Pool::builder()
        .max_size(1)
        .min_idle(Some(1))
        .max_lifetime(None)
        .idle_timeout(None)
        .test_on_check_out(false)
        .build(manager)?;
    Ok(pool)
}

fn apply_pragmas(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_pool_enforces_foreign_keys() {
        let pool = initialize_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let enabled: bool = conn
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))
            .unwrap();
        assert!(enabled);
    }

    #[test]
    fn test_memory_pool_keeps_state_between_checkouts() {
        let pool = initialize_memory_pool().unwrap();
        {
            let conn = pool.get().unwrap();
            conn.execute("CREATE TABLE t (v INTEGER)", []).unwrap();
            conn.execute("INSERT INTO t (v) VALUES (1)", []).unwrap();
        }

        for _ in 0..50 {
            let conn = pool.get().unwrap();
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))
                .unwrap();
            assert_eq!(count, 1);
        }
        assert_eq!(pool.state().connections, 1);
    }

    #[test]
    fn test_file_pool_uses_wal() {
        let dir = tempfile::tempdir().unwrap();
        let pool = initialize_pool(&dir.path().join("contacts.db"), 2).unwrap();
        let conn = pool.get().unwrap();
        let mode: String = conn
            .pragma_query_value(None, "journal_mode", |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }
}
