//! Type-narrowing guards over untyped JSON.
//!
//! Each `as_*` function narrows a [`Value`] to a concrete Rust type, returning `None` when the
//! value does not have that shape. The `is_*` predicates are the boolean form of the same checks.
//! None of these have side effects or panic.

use crate::entry::{EntryType, HealthCheckRating};
use crate::patient::Gender;
use serde_json::{Map, Value};

pub fn as_string(value: &Value) -> Option<&str> {
    value.as_str()
}

pub fn as_number(value: &Value) -> Option<f64> {
    value.as_f64()
}

pub fn as_plain_object(value: &Value) -> Option<&Map<String, Value>> {
    value.as_object()
}

/// Narrows to a string that names a real calendar date or date-time.
pub fn as_parseable_date(value: &Value) -> Option<&str> {
    as_string(value).filter(|text| patientor_types::is_parseable_date(text))
}

pub fn is_string(value: &Value) -> bool {
    as_string(value).is_some()
}

pub fn is_number(value: &Value) -> bool {
    as_number(value).is_some()
}

pub fn is_plain_object(value: &Value) -> bool {
    as_plain_object(value).is_some()
}

pub fn is_parseable_date(value: &Value) -> bool {
    as_parseable_date(value).is_some()
}

pub fn is_gender_tag(text: &str) -> bool {
    Gender::from_wire(text).is_some()
}

pub fn is_entry_tag(text: &str) -> bool {
    EntryType::from_wire(text).is_some()
}

/// True only for the four defined rating codes, not for any other number.
pub fn is_health_check_rating_value(value: f64) -> bool {
    HealthCheckRating::from_value(value).is_some()
}
