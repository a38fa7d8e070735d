//! ACID transaction helper

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::error::StoreResult;

/// Execute operation within an ACID transaction.
///
/// Commits when `operation` returns `Ok`. On `Err` the transaction is dropped
/// uncommitted, which rolls it back, and the error is returned unchanged.
///
/// # Example
/// ```rust,no_run
/// # use contact_book_server::db::execute_in_transaction;
/// # use contact_book_server::error::StoreResult;
/// # use rusqlite::{Connection, TransactionBehavior};
/// # fn example(conn: &mut Connection) -> StoreResult<()> {
/// execute_in_transaction(conn, TransactionBehavior::Immediate, |tx| {
///     tx.execute("DELETE FROM phone_numbers WHERE contact_id = ?1", [7])?;
///     Ok(())
/// })?;
/// # Ok(())
/// # }
/// ```
pub fn execute_in_transaction<F, T>(
    conn: &mut Connection,
    behavior: TransactionBehavior,
    operation: F,
) -> StoreResult<T>
where
    F: FnOnce(&Transaction) -> StoreResult<T>,
{
    let tx = conn.transaction_with_behavior(behavior)?;

    match operation(&tx) {
        Ok(result) => {
            tx.commit()?;
            Ok(result)
        }
        // Rollback happens via Drop
        Err(e) => Err(e),
    }
}
