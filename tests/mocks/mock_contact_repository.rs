use async_trait::async_trait;
use contact_book_server::domain::{ContactDraft, ContactId};
use contact_book_server::error::{StoreError, StoreResult};
use contact_book_server::models::Contact;
use contact_book_server::repositories::ContactRepository;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Keeps contacts in memory, hands out increasing IDs the way the SQLite store
/// does, and tracks method calls for verification.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<BTreeMap<i64, Contact>>>,
    next_id: Arc<Mutex<i64>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    fail_writes: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(Mutex::new(1)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            fail_writes: Arc::new(Mutex::new(false)),
        }
    }

    /// Add a contact as-is, bumping the ID counter past it.
    pub fn add_contact(&self, contact: Contact) {
        let mut next_id = self.next_id.lock().unwrap();
        if contact.id >= *next_id {
            *next_id = contact.id + 1;
        }
        self.contacts.lock().unwrap().insert(contact.id, contact);
    }

    /// Make every later write fail with a persistence error.
    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    /// Number of stored contacts.
    pub fn len(&self) -> usize {
        self.contacts.lock().unwrap().len()
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Reset all call counts.
    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn check_writable(&self) -> StoreResult<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StoreError::Persistence("mock write failure".to_string()));
        }
        Ok(())
    }

    fn sorted(&self) -> Vec<Contact> {
        let mut contacts: Vec<Contact> = self.contacts.lock().unwrap().values().cloned().collect();
        contacts.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        contacts
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn create(&self, draft: &ContactDraft) -> StoreResult<ContactId> {
        self.track_call("create");
        self.check_writable()?;

        let mut next_id = self.next_id.lock().unwrap();
        let id = ContactId::new(*next_id)?;
        *next_id += 1;

        self.contacts
            .lock()
            .unwrap()
            .insert(id.get(), Contact::from_draft(id, draft));
        Ok(id)
    }

    async fn get(&self, id: ContactId) -> StoreResult<Option<Contact>> {
        self.track_call("get");
        Ok(self.contacts.lock().unwrap().get(&id.get()).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Contact>> {
        self.track_call("list");
        Ok(self.sorted())
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Contact>> {
        self.track_call("search");
        Ok(self
            .sorted()
            .into_iter()
            .filter(|contact| contact.matches_query(query))
            .collect())
    }

    async fn update(&self, id: ContactId, draft: &ContactDraft) -> StoreResult<Contact> {
        self.track_call("update");
        self.check_writable()?;

        let mut contacts = self.contacts.lock().unwrap();
        match contacts.get_mut(&id.get()) {
            Some(slot) => {
                *slot = Contact::from_draft(id, draft);
                Ok(slot.clone())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    async fn delete(&self, id: ContactId) -> StoreResult<Option<String>> {
        self.track_call("delete");
        self.check_writable()?;

        Ok(self
            .contacts
            .lock()
            .unwrap()
            .remove(&id.get())
            .map(|contact| contact.name))
    }
}
