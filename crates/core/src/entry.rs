//! Medical entries and the entry parser.
//!
//! An entry is one medical encounter. All entries share a base (description, date, specialist,
//! optional diagnosis codes) and carry exactly one variant, selected by the `type` tag:
//!
//! | `type`                   | Variant fields                                   |
//! |--------------------------|--------------------------------------------------|
//! | `HealthCheck`            | `healthCheckRating`                              |
//! | `Hospital`               | `discharge { date, criteria }`                   |
//! | `OccupationalHealthcare` | `employerName`, `sickLeave { startDate, endDate }` |
//!
//! Variant fields are optional: a key that is absent from the submission is simply not attached.

use crate::diagnoses::{validate_diagnosis_codes, DiagnosisSet};
use crate::error::{ParseError, ParseResult};
use crate::fields::{
    parse_date, parse_description, parse_discharge, parse_employer_name, parse_entry_type,
    parse_health_check_rating, parse_sick_leave_lenient, parse_specialist,
};
use crate::guards::as_plain_object;
use patientor_types::{DateText, NonEmptyText};
use serde::Serialize;
use serde_json::Value;

const REQUIRED_KEYS: [&str; 4] = ["description", "date", "specialist", "type"];

/// The entry discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryType {
    HealthCheck,
    Hospital,
    OccupationalHealthcare,
}

impl EntryType {
    pub const ALL: [EntryType; 3] = [
        EntryType::HealthCheck,
        EntryType::Hospital,
        EntryType::OccupationalHealthcare,
    ];

    pub fn as_wire(self) -> &'static str {
        match self {
            EntryType::HealthCheck => "HealthCheck",
            EntryType::Hospital => "Hospital",
            EntryType::OccupationalHealthcare => "OccupationalHealthcare",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_wire() == s)
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Health-check outcome, serialised as its numeric code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HealthCheckRating {
    Healthy = 0,
    LowRisk = 1,
    HighRisk = 2,
    CriticalRisk = 3,
}

impl HealthCheckRating {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(HealthCheckRating::Healthy),
            1 => Some(HealthCheckRating::LowRisk),
            2 => Some(HealthCheckRating::HighRisk),
            3 => Some(HealthCheckRating::CriticalRisk),
            _ => None,
        }
    }

    /// Map a JSON number onto a rating. Only values exactly equal to a defined code qualify.
    pub fn from_value(value: f64) -> Option<Self> {
        if value.fract() != 0.0 || !(0.0..=3.0).contains(&value) {
            return None;
        }
        Self::from_code(value as u8)
    }
}

impl Serialize for HealthCheckRating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Discharge {
    pub date: DateText,
    pub criteria: NonEmptyText,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SickLeave {
    pub start_date: DateText,
    pub end_date: DateText,
}

/// Variant-specific part of an entry. Serialises with the `type` tag inline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum EntryDetails {
    HealthCheck {
        #[serde(rename = "healthCheckRating", skip_serializing_if = "Option::is_none")]
        health_check_rating: Option<HealthCheckRating>,
    },
    Hospital {
        #[serde(skip_serializing_if = "Option::is_none")]
        discharge: Option<Discharge>,
    },
    OccupationalHealthcare {
        #[serde(rename = "employerName", skip_serializing_if = "Option::is_none")]
        employer_name: Option<NonEmptyText>,
        #[serde(rename = "sickLeave", skip_serializing_if = "Option::is_none")]
        sick_leave: Option<SickLeave>,
    },
}

impl EntryDetails {
    pub fn entry_type(&self) -> EntryType {
        match self {
            EntryDetails::HealthCheck { .. } => EntryType::HealthCheck,
            EntryDetails::Hospital { .. } => EntryType::Hospital,
            EntryDetails::OccupationalHealthcare { .. } => EntryType::OccupationalHealthcare,
        }
    }
}

/// A validated entry that has not yet been given an identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub description: NonEmptyText,
    pub date: DateText,
    pub specialist: NonEmptyText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis_codes: Option<Vec<String>>,
    #[serde(flatten)]
    pub details: EntryDetails,
}

/// A stored entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub id: String,
    #[serde(flatten)]
    pub entry: NewEntry,
}

/// Narrow an untrusted JSON payload into a [`NewEntry`].
///
/// Order of checks:
/// 1. the payload must be an object;
/// 2. `description`, `date`, `specialist` and `type` must all be present as keys;
/// 3. the common fields are parsed in that order;
/// 4. the tag selects which variant fields are read;
/// 5. `diagnosisCodes`, when present, are checked against `diagnoses`.
///
/// Parsing is pure: nothing is stored here, and the first failure aborts the whole parse.
///
/// # Errors
///
/// Returns the [`ParseError`] of the first check that fails.
pub fn parse_new_entry(input: &Value, diagnoses: &DiagnosisSet) -> ParseResult<NewEntry> {
    let object = as_plain_object(input).ok_or(ParseError::NotAnObject)?;

    if !REQUIRED_KEYS.iter().all(|key| object.contains_key(*key)) {
        return Err(ParseError::MissingFields);
    }

    let description = parse_description(object.get("description"))?;
    let date = parse_date(object.get("date"))?;
    let specialist = parse_specialist(object.get("specialist"))?;
    let entry_type = parse_entry_type(object.get("type"))?;

    let details = match entry_type {
        EntryType::HealthCheck => EntryDetails::HealthCheck {
            health_check_rating: object
                .get("healthCheckRating")
                .map(|rating| parse_health_check_rating(Some(rating)))
                .transpose()?,
        },
        EntryType::Hospital => EntryDetails::Hospital {
            discharge: object
                .get("discharge")
                .map(|discharge| parse_discharge(Some(discharge)))
                .transpose()?,
        },
        EntryType::OccupationalHealthcare => match object.get("employerName") {
            Some(employer) => EntryDetails::OccupationalHealthcare {
                employer_name: Some(parse_employer_name(Some(employer))?),
                sick_leave: object
                    .get("sickLeave")
                    .and_then(|sick_leave| parse_sick_leave_lenient(Some(sick_leave))),
            },
            // Sick leave is only read alongside an employer.
            None => EntryDetails::OccupationalHealthcare {
                employer_name: None,
                sick_leave: None,
            },
        },
    };

    let diagnosis_codes = if object.contains_key("diagnosisCodes") {
        Some(validate_diagnosis_codes(input, diagnoses)?)
    } else {
        None
    };

    Ok(NewEntry {
        description,
        date,
        specialist,
        diagnosis_codes,
        details,
    })
}
