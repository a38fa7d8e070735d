//! PhoneNumber value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Longest digit run the display mask renders.
const MASK_MAX_DIGITS: usize = 11;

/// A normalized phone number: ASCII decimal digits only, never empty.
///
/// Raw input such as `"(11) 95551-2345"` is reduced to `"11955512345"` before it
/// is stored. Formatting is a display concern handled by [`PhoneNumber::masked`].
///
/// # Example
///
/// ```
/// use contact_book_server::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("(11) 95551-2345").unwrap();
/// assert_eq!(phone.as_str(), "11955512345");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber from raw input, keeping only its digits.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NoValidPhoneNumber` if the input has no digits.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        Self::normalize(raw.as_ref()).ok_or(ValidationError::NoValidPhoneNumber)
    }

    /// Reduce a raw value to its digits, or `None` if nothing is left.
    pub fn normalize(raw: &str) -> Option<Self> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            None
        } else {
            Some(Self(digits))
        }
    }

    /// Normalize a list of raw values, discarding entries without digits.
    ///
    /// Input order is preserved. Duplicates are kept, since the stored set is
    /// exactly what the caller wrote.
    ///
    /// # Errors
    ///
    /// - `ValidationError::MissingPhoneNumbers` if `raws` is empty
    /// - `ValidationError::NoValidPhoneNumber` if no entry contains a digit
    pub fn normalize_all<I, S>(raws: I) -> Result<Vec<Self>, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen_any = false;
        let mut phones = Vec::new();
        for raw in raws {
            seen_any = true;
            if let Some(phone) = Self::normalize(raw.as_ref()) {
                phones.push(phone);
            }
        }

        if !seen_any {
            return Err(ValidationError::MissingPhoneNumbers);
        }
        if phones.is_empty() {
            return Err(ValidationError::NoValidPhoneNumber);
        }
        Ok(phones)
    }

    /// Get the digits as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Render the number with the Brazilian display mask.
    ///
    /// Digits beyond the eleventh are dropped. Mobile numbers (11 digits) render
    /// as `(DD) DDDDD-DDDD`, landlines as `(DD) DDDD-DDDD`, and shorter values as
    /// much of the mask as they fill.
    pub fn masked(&self) -> String {
        let digits = &self.0[..self.0.len().min(MASK_MAX_DIGITS)];
        let len = digits.len();

        if len > 10 {
            format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..])
        } else if len > 6 {
            format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..])
        } else if len > 2 {
            format!("({}) {}", &digits[..2], &digits[2..])
        } else {
            format!("({}", digits)
        }
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
