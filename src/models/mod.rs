//! Data models for the contact book.
//!
//! The [`Contact`] aggregate returned by every read path, the flat [`ContactRow`]
//! it is stored as, and the grouping function that turns one into the other.

pub mod contact;

pub use contact::{group_rows, Contact, ContactRow};
