//! Validated text primitives shared across the Patientor crates.
//!
//! Values arriving over the wire are untyped. The types in this crate can only be constructed
//! from text that has already passed validation, so holding one is proof the check happened.
//! Accepted text is kept exactly as supplied; nothing is trimmed or normalised.

mod date;

pub use date::{is_parseable_date, DateText};

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty
    #[error("Text cannot be empty")]
    Empty,

    /// The input text does not name a real calendar date or date-time
    #[error("Text is not a valid date: {0}")]
    InvalidDate(String),
}

/// A string type that guarantees non-empty content.
///
/// Construction rejects only the empty string; whitespace counts as content. The text is kept
/// verbatim, so a record built from input reads back exactly as it was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `Err(TextError::Empty)` if the input is empty.
    pub fn new(input: impl Into<String>) -> Result<Self, TextError> {
        let text = input.into();
        if text.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(text))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}
