//! Contact service layer.
//!
//! Turns raw client input into validated drafts, delegates to the repository,
//! and records deletions in the deletion log.

use crate::deletion_log::{DeletionLog, DeletionRecord};
use crate::domain::{AgeInput, ContactDraft, ContactId, ValidationError};
use crate::error::{StoreError, StoreResult};
use crate::models::Contact;
use crate::repositories::ContactRepository;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Validate input and create a contact, returning it as stored.
    async fn create_contact(
        &self,
        name: &str,
        age: &AgeInput,
        raw_phones: &[String],
    ) -> StoreResult<Contact>;

    /// All contacts, ordered by name.
    async fn list_contacts(&self) -> StoreResult<Vec<Contact>>;

    /// Contacts matching a free-text query that is not blank.
    ///
    /// The query is matched as given: surrounding spaces are part of it.
    async fn search_contacts(&self, query: &str) -> StoreResult<Vec<Contact>>;

    /// Get a single contact.
    async fn get_contact(&self, id: ContactId) -> StoreResult<Contact>;

    /// Replace a contact's name, age and phone set.
    async fn update_contact(
        &self,
        id: ContactId,
        name: &str,
        age: &AgeInput,
        raw_phones: &[String],
    ) -> StoreResult<Contact>;

    /// Delete a contact and log the deletion, returning the deleted name.
    async fn delete_contact(&self, id: ContactId) -> StoreResult<String>;
}

/// Default implementation of ContactService.
pub struct ContactServiceImpl {
    repository: Arc<dyn ContactRepository>,
    deletion_log: Arc<dyn DeletionLog>,
}

impl ContactServiceImpl {
    /// Create a new contact service.
    pub fn new(repository: Arc<dyn ContactRepository>, deletion_log: Arc<dyn DeletionLog>) -> Self {
        Self {
            repository,
            deletion_log,
        }
    }

    fn report(operation: &str, err: &StoreError) {
        match err {
            StoreError::Validation(_) | StoreError::NotFound(_) => {
                warn!(operation, "Rejected: {}", err)
            }
            _ => error!(operation, "Failed: {}", err),
        }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn create_contact(
        &self,
        name: &str,
        age: &AgeInput,
        raw_phones: &[String],
    ) -> StoreResult<Contact> {
        let result = async {
            let draft = ContactDraft::new(name, age, raw_phones)?;
            let id = self.repository.create(&draft).await?;
            Ok::<_, StoreError>(Contact::from_draft(id, &draft))
        }
        .await;

        match &result {
            Ok(contact) => info!(contact_id = contact.id, "Contact created"),
            Err(e) => Self::report("create", e),
        }
        result
    }

    async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        let result = self.repository.list().await;
        match &result {
            Ok(contacts) => info!(count = contacts.len(), "Contacts listed"),
            Err(e) => Self::report("list", e),
        }
        result
    }

    async fn search_contacts(&self, query: &str) -> StoreResult<Vec<Contact>> {
        // Blank queries are rejected; others are matched as given, spaces included.
        let result = if query.trim().is_empty() {
            Err(StoreError::from(ValidationError::EmptyQuery))
        } else {
            self.repository.search(query).await
        };

        match &result {
            Ok(contacts) => info!(query, count = contacts.len(), "Search completed"),
            Err(e) => Self::report("search", e),
        }
        result
    }

    async fn get_contact(&self, id: ContactId) -> StoreResult<Contact> {
        let result = match self.repository.get(id).await {
            Ok(Some(contact)) => Ok(contact),
            Ok(None) => Err(StoreError::NotFound(id)),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            Self::report("get", e);
        }
        result
    }

    async fn update_contact(
        &self,
        id: ContactId,
        name: &str,
        age: &AgeInput,
        raw_phones: &[String],
    ) -> StoreResult<Contact> {
        let result = async {
            let draft = ContactDraft::new(name, age, raw_phones)?;
            self.repository.update(id, &draft).await
        }
        .await;

        match &result {
            Ok(_) => info!(contact_id = %id, "Contact updated"),
            Err(e) => Self::report("update", e),
        }
        result
    }

    async fn delete_contact(&self, id: ContactId) -> StoreResult<String> {
        let name = match self.repository.delete(id).await {
            Ok(Some(name)) => name,
            Ok(None) => {
                let err = StoreError::NotFound(id);
                Self::report("delete", &err);
                return Err(err);
            }
            Err(e) => {
                Self::report("delete", &e);
                return Err(e);
            }
        };

        info!(contact_id = %id, name = %name, "Contact deleted");

        if let Err(e) = self
            .deletion_log
            .record(&DeletionRecord::now(id, name.clone()))
            .await
        {
            warn!(contact_id = %id, "Failed to append deletion log: {}", e);
        }

        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deletion_log::NoopDeletionLog;
    use crate::repositories::SqliteContactRepository;
    use std::io;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLog {
        records: Mutex<Vec<DeletionRecord>>,
    }

    #[async_trait]
    impl DeletionLog for RecordingLog {
        async fn record(&self, record: &DeletionRecord) -> io::Result<()> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct BrokenLog;

    #[async_trait]
    impl DeletionLog for BrokenLog {
        async fn record(&self, _record: &DeletionRecord) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    fn service_with_log(log: Arc<dyn DeletionLog>) -> ContactServiceImpl {
        let repo = SqliteContactRepository::in_memory().unwrap();
        ContactServiceImpl::new(Arc::new(repo), log)
    }

    fn phones(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_create_returns_normalized_contact() {
        let service = service_with_log(Arc::new(NoopDeletionLog));

        let contact = service
            .create_contact("  Ana  ", &AgeInput::from("30"), &phones(&["(11) 9555-1234"]))
            .await
            .unwrap();

        assert_eq!(contact.name, "Ana");
        assert_eq!(contact.age, 30);
        assert_eq!(contact.phone_numbers, vec!["1195551234"]);
        let stored = service
            .get_contact(ContactId::new(contact.id).unwrap())
            .await
            .unwrap();
        assert_eq!(stored, contact);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let service = service_with_log(Arc::new(NoopDeletionLog));

        let err = service
            .create_contact("Ana", &AgeInput::from(30u32), &phones(&["abc", "   "]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::NoValidPhoneNumber)
        ));

        let err = service
            .create_contact("", &AgeInput::from(30u32), &phones(&["123"]))
            .await
            .unwrap_err();
        assert!(err.is_validation());

        assert!(service.list_contacts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_rejects_blank_query() {
        let service = service_with_log(Arc::new(NoopDeletionLog));
        let err = service.search_contacts("   ").await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(ValidationError::EmptyQuery)));
    }

    #[tokio::test]
    async fn test_search_keeps_surrounding_spaces() {
        let service = service_with_log(Arc::new(NoopDeletionLog));
        for name in ["Ana Silva", "Silva Costa"] {
            service
                .create_contact(name, &AgeInput::from(30u32), &phones(&["123"]))
                .await
                .unwrap();
        }

        let found = service.search_contacts(" silva").await.unwrap();
        let names: Vec<&str> = found.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Silva"]);

        assert_eq!(service.search_contacts("silva").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_records_deletion() {
        let log = Arc::new(RecordingLog::default());
        let service = service_with_log(log.clone());
        let contact = service
            .create_contact("Bruno", &AgeInput::from(41u32), &phones(&["999"]))
            .await
            .unwrap();
        let id = ContactId::new(contact.id).unwrap();

        assert_eq!(service.delete_contact(id).await.unwrap(), "Bruno");

        let records = log.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].name, "Bruno");
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found_and_not_logged() {
        let log = Arc::new(RecordingLog::default());
        let service = service_with_log(log.clone());

        let err = service
            .delete_contact(ContactId::new(5).unwrap())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(log.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_succeeds_when_log_fails() {
        let service = service_with_log(Arc::new(BrokenLog));
        let contact = service
            .create_contact("Carla", &AgeInput::from(22u32), &phones(&["1"]))
            .await
            .unwrap();
        let id = ContactId::new(contact.id).unwrap();

        assert_eq!(service.delete_contact(id).await.unwrap(), "Carla");
        assert!(service.get_contact(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = service_with_log(Arc::new(NoopDeletionLog));
        let err = service
            .update_contact(
                ContactId::new(3).unwrap(),
                "Ghost",
                &AgeInput::from(30u32),
                &phones(&["1"]),
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
