//! Schema versioning and bootstrap

use rusqlite::Connection;
use tracing::info;

use crate::error::StoreResult;

/// Current schema version, tracked in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i32 = 1;

const SCHEMA_V1: &str = "
    CREATE TABLE IF NOT EXISTS contacts (
        id   INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT    NOT NULL,
        age  INTEGER NOT NULL CHECK (age > 0)
    );

    CREATE TABLE IF NOT EXISTS phone_numbers (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        contact_id INTEGER NOT NULL REFERENCES contacts(id),
        digits     TEXT    NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_phone_numbers_contact_id
        ON phone_numbers(contact_id);
";

/// Bring the database up to [`SCHEMA_VERSION`].
///
/// Safe to run on every startup: statements are `IF NOT EXISTS` and a database
/// already at the current version is left untouched.
pub fn migrate_to_latest(conn: &mut Connection) -> StoreResult<()> {
    let current = schema_version(conn)?;
    if current >= SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_V1)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;

    info!(from = current, to = SCHEMA_VERSION, "Database schema migrated");
    Ok(())
}

/// Read the schema version stored in the database header.
pub fn schema_version(conn: &Connection) -> StoreResult<i32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrate_creates_tables() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate_to_latest(&mut conn).unwrap();

        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master
                 WHERE type = 'table' AND name IN ('contacts', 'phone_numbers')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 2);
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate_to_latest(&mut conn).unwrap();
        conn.execute("INSERT INTO contacts (name, age) VALUES ('Ana', 30)", [])
            .unwrap();

        migrate_to_latest(&mut conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_schema_rejects_non_positive_age() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate_to_latest(&mut conn).unwrap();

        let result = conn.execute("INSERT INTO contacts (name, age) VALUES ('Ana', 0)", []);
        assert!(result.is_err());
    }
}
