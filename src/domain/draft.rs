//! Validated input for creating or replacing a contact.

use super::errors::ValidationError;
use super::phone::PhoneNumber;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Age as it arrives from a client: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgeInput {
    Number(f64),
    Text(String),
}

impl From<u32> for AgeInput {
    fn from(age: u32) -> Self {
        AgeInput::Number(f64::from(age))
    }
}

impl From<&str> for AgeInput {
    fn from(age: &str) -> Self {
        AgeInput::Text(age.to_string())
    }
}

impl fmt::Display for AgeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeInput::Number(n) => write!(f, "{}", n),
            AgeInput::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A positive whole-number age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Age(u32);

impl Age {
    /// Create an Age, rejecting zero.
    pub fn new(age: u32) -> Result<Self, ValidationError> {
        if age == 0 {
            return Err(ValidationError::InvalidAge(age.to_string()));
        }
        Ok(Self(age))
    }

    /// Convert client input into an Age.
    ///
    /// Numeric strings are trimmed and parsed. The value must be finite, greater
    /// than zero, whole, and fit in a `u32`.
    pub fn parse(input: &AgeInput) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidAge(input.to_string());

        let value = match input {
            AgeInput::Number(n) => *n,
            AgeInput::Text(s) => s.trim().parse::<f64>().map_err(|_| invalid())?,
        };

        if !value.is_finite() || value <= 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX)
        {
            return Err(invalid());
        }

        Ok(Self(value as u32))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Age {
    type Error = ValidationError;

    fn try_from(age: u32) -> Result<Self, Self::Error> {
        Age::new(age)
    }
}

impl From<Age> for u32 {
    fn from(age: Age) -> Self {
        age.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything needed to write a contact: trimmed name, age, and the normalized
/// phone set that will replace whatever the contact had before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    name: String,
    age: Age,
    phones: Vec<PhoneNumber>,
}

impl ContactDraft {
    /// Validate and normalize raw contact input.
    ///
    /// # Errors
    ///
    /// - `EmptyName` when the trimmed name is empty
    /// - `InvalidAge` when the age is not a positive whole number
    /// - `MissingPhoneNumbers` / `NoValidPhoneNumber` from phone normalization
    pub fn new<I, S>(name: &str, age: &AgeInput, raw_phones: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let age = Age::parse(age)?;
        let phones = PhoneNumber::normalize_all(raw_phones)?;

        Ok(Self {
            name: name.to_string(),
            age,
            phones,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> Age {
        self.age
    }

    /// Normalized phone numbers, in input order. Never empty.
    pub fn phones(&self) -> &[PhoneNumber] {
        &self.phones
    }
}
