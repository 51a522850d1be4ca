//! Patients and the new-patient parser.

use crate::entry::Entry;
use crate::error::{ParseError, ParseResult};
use crate::fields::{parse_date, parse_gender, parse_name, parse_occupation, parse_ssn};
use crate::guards::as_plain_object;
use patientor_types::{DateText, NonEmptyText};
use serde::Serialize;
use serde_json::Value;

const REQUIRED_KEYS: [&str; 5] = ["name", "dateOfBirth", "ssn", "gender", "occupation"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_wire(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

/// A validated patient submission, before the store assigns an identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: NonEmptyText,
    pub date_of_birth: DateText,
    pub ssn: NonEmptyText,
    pub gender: Gender,
    pub occupation: NonEmptyText,
    pub entries: Vec<Entry>,
}

/// A stored patient, including the sensitive `ssn`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: NonEmptyText,
    pub date_of_birth: DateText,
    pub ssn: NonEmptyText,
    pub gender: Gender,
    pub occupation: NonEmptyText,
    pub entries: Vec<Entry>,
}

impl Patient {
    pub fn from_new(id: String, new: NewPatient) -> Self {
        Self {
            id,
            name: new.name,
            date_of_birth: new.date_of_birth,
            ssn: new.ssn,
            gender: new.gender,
            occupation: new.occupation,
            entries: new.entries,
        }
    }

    /// The public view of this patient, without `ssn`.
    pub fn summary(&self) -> PatientSummary {
        PatientSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            date_of_birth: self.date_of_birth.clone(),
            gender: self.gender,
            occupation: self.occupation.clone(),
            entries: self.entries.clone(),
        }
    }
}

/// Patient as shown on listings: everything except `ssn`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    pub id: String,
    pub name: NonEmptyText,
    pub date_of_birth: DateText,
    pub gender: Gender,
    pub occupation: NonEmptyText,
    pub entries: Vec<Entry>,
}

/// Narrow an untrusted JSON payload into a [`NewPatient`] with no entries.
///
/// # Errors
///
/// - [`ParseError::NotAnObject`] if the payload is not an object.
/// - [`ParseError::MissingFields`] if any of `name`, `dateOfBirth`, `ssn`, `gender`,
///   `occupation` is absent.
/// - the field error of the first field that fails, in that order.
pub fn parse_new_patient(input: &Value) -> ParseResult<NewPatient> {
    let object = as_plain_object(input).ok_or(ParseError::NotAnObject)?;

    if !REQUIRED_KEYS.iter().all(|key| object.contains_key(*key)) {
        return Err(ParseError::MissingFields);
    }

    Ok(NewPatient {
        name: parse_name(object.get("name"))?,
        date_of_birth: parse_date(object.get("dateOfBirth"))?,
        ssn: parse_ssn(object.get("ssn"))?,
        gender: parse_gender(object.get("gender"))?,
        occupation: parse_occupation(object.get("occupation"))?,
        entries: Vec::new(),
    })
}
