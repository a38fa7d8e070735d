use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Params, Row, TransactionBehavior};
use tracing::debug;

use crate::db::{self, execute_in_transaction, with_connection, DbPool};
use crate::domain::{ContactDraft, ContactId, PhoneNumber};
use crate::error::{StoreError, StoreResult};
use crate::models::{group_rows, Contact, ContactRow};
use crate::repositories::traits::ContactRepository;

const SELECT_AGGREGATE: &str = "
    SELECT c.id, c.name, c.age, p.digits
    FROM contacts c
    LEFT JOIN phone_numbers p ON p.contact_id = c.id";

/// Contact repository backed by SQLite.
///
/// Each operation checks out one pooled connection on the blocking thread pool
/// and holds it for the whole operation. Writes run in `BEGIN IMMEDIATE`
/// transactions and roll back on any error.
#[derive(Clone)]
pub struct SqliteContactRepository {
    pool: DbPool,
}

impl SqliteContactRepository {
    /// Wrap an existing pool, bringing its schema up to date.
    pub fn connect(pool: DbPool) -> StoreResult<Self> {
        {
            let mut conn = pool.get()?;
            db::migrate_to_latest(&mut conn)?;
        }
        Ok(Self { pool })
    }

    /// A repository over a private in-memory database.
    pub fn in_memory() -> StoreResult<Self> {
        Self::connect(db::initialize_memory_pool()?)
    }

    /// The underlying pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ContactRepository for SqliteContactRepository {
    async fn create(&self, draft: &ContactDraft) -> StoreResult<ContactId> {
        let draft = draft.clone();

        let id = with_connection(&self.pool, move |conn| {
            execute_in_transaction(conn, TransactionBehavior::Immediate, |tx| {
                let id: Option<i64> = tx
                    .query_row(
                        "INSERT INTO contacts (name, age) VALUES (?1, ?2) RETURNING id",
                        params![draft.name(), draft.age().get()],
                        |row| row.get(0),
                    )
                    .optional()?;

                let id = id
                    .and_then(|id| ContactId::new(id).ok())
                    .ok_or_else(|| {
                        StoreError::Persistence("Contact insert returned no ID".to_string())
                    })?;

                insert_phones(tx, id, draft.phones())?;
                Ok(id)
            })
        })
        .await?;

        debug!(contact_id = %id, "Inserted contact");
        Ok(id)
    }

    async fn get(&self, id: ContactId) -> StoreResult<Option<Contact>> {
        with_connection(&self.pool, move |conn| fetch_one(conn, id)).await
    }

    async fn list(&self) -> StoreResult<Vec<Contact>> {
        with_connection(&self.pool, |conn| fetch_all(conn)).await
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Contact>> {
        let query = query.to_string();

        with_connection(&self.pool, move |conn| {
            let matches = fetch_all(conn)?
                .into_iter()
                .filter(|contact| contact.matches_query(&query))
                .collect();
            Ok(matches)
        })
        .await
    }

    async fn update(&self, id: ContactId, draft: &ContactDraft) -> StoreResult<Contact> {
        let draft = draft.clone();

        with_connection(&self.pool, move |conn| {
            execute_in_transaction(conn, TransactionBehavior::Immediate, |tx| {
                let changed = tx.execute(
                    "UPDATE contacts SET name = ?1, age = ?2 WHERE id = ?3",
                    params![draft.name(), draft.age().get(), id.get()],
                )?;
                if changed == 0 {
                    return Err(StoreError::NotFound(id));
                }

                tx.execute(
                    "DELETE FROM phone_numbers WHERE contact_id = ?1",
                    [id.get()],
                )?;
                insert_phones(tx, id, draft.phones())?;

                fetch_one(tx, id)?.ok_or_else(|| {
                    StoreError::Persistence(format!("Contact {} vanished during update", id))
                })
            })
        })
        .await
    }

    async fn delete(&self, id: ContactId) -> StoreResult<Option<String>> {
        with_connection(&self.pool, move |conn| {
            execute_in_transaction(conn, TransactionBehavior::Immediate, |tx| {
                tx.execute(
                    "DELETE FROM phone_numbers WHERE contact_id = ?1",
                    [id.get()],
                )?;
                let name = tx
                    .query_row(
                        "DELETE FROM contacts WHERE id = ?1 RETURNING name",
                        [id.get()],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(name)
            })
        })
        .await
    }
}

fn insert_phones(conn: &Connection, id: ContactId, phones: &[PhoneNumber]) -> StoreResult<()> {
    let mut stmt =
        conn.prepare_cached("INSERT INTO phone_numbers (contact_id, digits) VALUES (?1, ?2)")?;
    for phone in phones {
        stmt.execute(params![id.get(), phone.as_str()])?;
    }
    Ok(())
}

fn fetch_all(conn: &Connection) -> StoreResult<Vec<Contact>> {
    query_contacts(
        conn,
        &format!("{SELECT_AGGREGATE} ORDER BY c.name ASC, c.id ASC, p.id ASC"),
        [],
    )
}

fn fetch_one(conn: &Connection, id: ContactId) -> StoreResult<Option<Contact>> {
    let contacts = query_contacts(
        conn,
        &format!("{SELECT_AGGREGATE} WHERE c.id = ?1 ORDER BY p.id ASC"),
        [id.get()],
    )?;
    Ok(contacts.into_iter().next())
}

fn query_contacts<P: Params>(conn: &Connection, sql: &str, params: P) -> StoreResult<Vec<Contact>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt
        .query_map(params, read_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(group_rows(rows))
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<ContactRow> {
    Ok(ContactRow {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        phone: row.get(3)?,
    })
}
