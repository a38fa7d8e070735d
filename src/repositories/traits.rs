use crate::domain::{ContactDraft, ContactId};
use crate::error::StoreResult;
use crate::models::Contact;
use async_trait::async_trait;

/// Repository for managing contacts and the phone numbers they own.
///
/// Every write is atomic across the contact and its phone numbers: either the
/// whole aggregate changes or nothing does. Implementations: SQLite for real
/// use, in-memory mocks for tests.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Insert a contact and its phone numbers, returning the new ID.
    async fn create(&self, draft: &ContactDraft) -> StoreResult<ContactId>;

    /// Retrieve a single contact by ID.
    async fn get(&self, id: ContactId) -> StoreResult<Option<Contact>>;

    /// All contacts, ordered by name then ID.
    async fn list(&self) -> StoreResult<Vec<Contact>>;

    /// Contacts whose name (case-insensitive) or any phone number contains `query`.
    ///
    /// Same order and shape as [`list`](Self::list). Matching contacts carry
    /// their full phone set.
    async fn search(&self, query: &str) -> StoreResult<Vec<Contact>>;

    /// Overwrite name and age and replace the whole phone set.
    ///
    /// Returns `StoreError::NotFound` if no contact has this ID.
    async fn update(&self, id: ContactId, draft: &ContactDraft) -> StoreResult<Contact>;

    /// Delete a contact with its phone numbers, returning the deleted name.
    ///
    /// `Ok(None)` when there was nothing to delete.
    async fn delete(&self, id: ContactId) -> StoreResult<Option<String>>;
}
