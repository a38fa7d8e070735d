//! Domain value objects and types.
//!
//! Type-safe wrappers for contact IDs, ages and phone numbers, plus the
//! validated [`ContactDraft`] used for every write. Invalid input is rejected
//! here, before it can reach the store.

pub mod contact_id;
pub mod draft;
pub mod errors;
pub mod phone;

pub use contact_id::ContactId;
pub use draft::{Age, AgeInput, ContactDraft};
pub use errors::ValidationError;
pub use phone::PhoneNumber;
