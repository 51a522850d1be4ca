//! Date strings as they travel on the wire.
//!
//! Dates in patient records are kept as the caller wrote them. What matters is that the text
//! names a real calendar day or instant: `2021-02-30` and `yesterday` are both rejected.

use crate::TextError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_DATE_FORMAT: &str = "%Y-%m-%d";
const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
// `%#z` also takes `Z`.
const OFFSET_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M%#z";

/// Returns true if `text` parses to a real calendar date or date-time.
///
/// Accepted shapes:
/// - RFC 3339 date-times (`2020-01-01T10:00:00Z`, `2020-01-01T10:00:00+02:00`)
/// - date-times without seconds (`2020-01-01T10:00`, `2020-01-01T10:00Z`, `2020-01-01T10:00+02:00`)
/// - naive date-times (`2020-01-01T10:00:00`, `2020-01-01 10:00:00.250`)
/// - plain dates (`2020-01-01`)
/// - reduced precision dates (`2020-01`, `2020`)
pub fn is_parseable_date(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }

    DateTime::parse_from_rfc3339(text).is_ok()
        || DateTime::parse_from_str(text, OFFSET_DATE_TIME_FORMAT).is_ok()
        || NaiveDate::parse_from_str(text, NAIVE_DATE_FORMAT).is_ok()
        || NAIVE_DATE_TIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(text, fmt).is_ok())
        || is_reduced_precision_date(text)
}

/// `YYYY` or `YYYY-MM` with a real month.
fn is_reduced_precision_date(text: &str) -> bool {
    let bytes = text.as_bytes();
    match bytes.len() {
        4 => bytes.iter().all(u8::is_ascii_digit),
        7 => {
            bytes[4] == b'-'
                && bytes[..4].iter().chain(&bytes[5..]).all(u8::is_ascii_digit)
                && NaiveDate::parse_from_str(&format!("{text}-01"), NAIVE_DATE_FORMAT).is_ok()
        }
        _ => false,
    }
}

/// A date string that is known to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateText(String);

impl DateText {
    /// Validates `input` with [`is_parseable_date`] and wraps it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::InvalidDate`] if the text is not a real date or date-time.
    pub fn new(input: impl Into<String>) -> Result<Self, TextError> {
        let text = input.into();
        if !is_parseable_date(&text) {
            return Err(TextError::InvalidDate(text));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for DateText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DateText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for DateText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}
