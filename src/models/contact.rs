//! Contact aggregate and the row shape it is read from.

use crate::domain::{ContactDraft, ContactId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A contact together with every phone number it owns.
///
/// This is the shape returned by every read path and serialized over HTTP as
/// `{id, name, age, phoneNumbers}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Store-assigned identifier
    pub id: i64,

    /// Trimmed display name
    pub name: String,

    /// Age in years, always positive
    pub age: u32,

    /// Digit-only phone numbers in insertion order
    pub phone_numbers: Vec<String>,
}

impl Contact {
    /// Create a contact with no phone numbers.
    pub fn new(id: i64, name: impl Into<String>, age: u32) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            phone_numbers: Vec::new(),
        }
    }

    /// Build the aggregate a draft produces once it is stored under `id`.
    pub fn from_draft(id: ContactId, draft: &ContactDraft) -> Self {
        Self {
            id: id.get(),
            name: draft.name().to_string(),
            age: draft.age().get(),
            phone_numbers: draft
                .phones()
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
        }
    }

    /// Whether this contact matches a free-text search query.
    ///
    /// The name matches on a case-insensitive substring; phone numbers match on a
    /// case-sensitive substring. Either side is enough. The query is taken
    /// literally, so `%` and `_` have no special meaning.
    pub fn matches_query(&self, query: &str) -> bool {
        let query_lower = query.to_lowercase();
        if self.name.to_lowercase().contains(&query_lower) {
            return true;
        }
        self.phone_numbers.iter().any(|p| p.contains(query))
    }
}

/// One row of the contacts LEFT JOIN phone_numbers query.
///
/// A contact with several phones fans out into several rows; a contact with none
/// yields a single row with `phone: None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRow {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub phone: Option<String>,
}

/// Fold flat join rows back into contacts.
///
/// Rows are grouped by contact ID. Contacts come out in the order their first row
/// was seen, and phones keep their row order within each contact, so an ordered
/// query yields ordered aggregates.
pub fn group_rows<I>(rows: I) -> Vec<Contact>
where
    I: IntoIterator<Item = ContactRow>,
{
    let mut contacts: Vec<Contact> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(row.id).or_insert_with(|| {
            contacts.push(Contact::new(row.id, row.name, row.age));
            contacts.len() - 1
        });

        if let Some(phone) = row.phone {
            contacts[slot].phone_numbers.push(phone);
        }
    }

    contacts
}
