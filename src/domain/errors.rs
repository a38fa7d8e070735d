//! Domain validation errors.

use std::fmt;

/// Errors that can occur while validating contact input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The contact name is empty after trimming.
    EmptyName,

    /// The age is missing, not numeric, not a whole number, or not positive.
    InvalidAge(String),

    /// No phone number list was supplied, or the list is empty.
    MissingPhoneNumbers,

    /// Every supplied phone number was empty after stripping non-digits.
    NoValidPhoneNumber,

    /// The search query is empty after trimming.
    EmptyQuery,

    /// The contact ID is missing or not a positive integer.
    InvalidId(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name is required"),
            Self::InvalidAge(age) => write!(f, "Invalid age: {}", age),
            Self::MissingPhoneNumbers => write!(f, "At least one phone number is required"),
            Self::NoValidPhoneNumber => write!(f, "No valid phone number supplied"),
            Self::EmptyQuery => write!(f, "Search query cannot be empty"),
            Self::InvalidId(id) => write!(f, "Invalid contact ID: {}", id),
        }
    }
}

impl std::error::Error for ValidationError {}
