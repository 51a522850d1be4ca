//! Diagnosis reference dataset and diagnosis-code validation.
//!
//! The reference set is fixed for the life of the process: it is loaded once at startup (either
//! the bundled dataset or a file named in configuration) and never mutated.

use crate::error::{ConfigError, ConfigResult, ParseError, ParseResult};
use crate::guards::as_string;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

const BUNDLED_DIAGNOSES: &str = include_str!("../data/diagnoses.json");

/// A reference diagnosis: unique code, display name, optional Latin name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latin: Option<String>,
}

/// The immutable set of known diagnoses, keyed by code.
#[derive(Debug, Clone)]
pub struct DiagnosisSet {
    diagnoses: Vec<Diagnosis>,
    codes: HashSet<String>,
}

impl DiagnosisSet {
    /// Build a reference set from a list of diagnoses.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInput`] if the list is empty, a code is blank, or a code
    /// appears more than once.
    pub fn new(diagnoses: Vec<Diagnosis>) -> ConfigResult<Self> {
        if diagnoses.is_empty() {
            return Err(ConfigError::InvalidInput(
                "diagnosis reference set cannot be empty".into(),
            ));
        }

        let mut codes = HashSet::with_capacity(diagnoses.len());
        for diagnosis in &diagnoses {
            if diagnosis.code.trim().is_empty() {
                return Err(ConfigError::InvalidInput(
                    "diagnosis code cannot be empty".into(),
                ));
            }
            if !codes.insert(diagnosis.code.clone()) {
                return Err(ConfigError::InvalidInput(format!(
                    "duplicate diagnosis code: {}",
                    diagnosis.code
                )));
            }
        }

        Ok(Self { diagnoses, codes })
    }

    /// Parse a JSON array of diagnoses.
    pub fn from_json(text: &str) -> ConfigResult<Self> {
        let diagnoses: Vec<Diagnosis> =
            serde_json::from_str(text).map_err(ConfigError::Deserialization)?;
        Self::new(diagnoses)
    }

    /// Load a JSON array of diagnoses from disk.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// The dataset compiled into the binary.
    pub fn bundled() -> ConfigResult<Self> {
        Self::from_json(BUNDLED_DIAGNOSES)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// All diagnoses, in dataset order.
    pub fn all(&self) -> &[Diagnosis] {
        &self.diagnoses
    }

    pub fn len(&self) -> usize {
        self.diagnoses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnoses.is_empty()
    }
}

/// Validate the `diagnosisCodes` of a submitted payload against the reference set.
///
/// `input` is the whole submitted object, not the value of the key. Absence of the key (or a
/// non-object input) yields an empty list. When present it must be an array, and every element
/// must be a string found in `reference`. All offending elements are reported together.
///
/// On success the codes come back in submitted order with duplicates kept.
///
/// # Errors
///
/// - [`ParseError::MissingOrIncorrect`] if `diagnosisCodes` is not an array.
/// - [`ParseError::InvalidDiagnosisCodes`] listing every unknown or non-string element.
pub fn validate_diagnosis_codes(input: &Value, reference: &DiagnosisSet) -> ParseResult<Vec<String>> {
    let Some(raw) = input.get("diagnosisCodes") else {
        return Ok(Vec::new());
    };

    let items = raw
        .as_array()
        .ok_or(ParseError::MissingOrIncorrect("diagnosis codes"))?;

    let mut codes = Vec::with_capacity(items.len());
    let mut invalid = Vec::new();
    for item in items {
        match as_string(item) {
            Some(code) if reference.contains(code) => codes.push(code.to_owned()),
            Some(code) => invalid.push(code.to_owned()),
            None => invalid.push(item.to_string()),
        }
    }

    if !invalid.is_empty() {
        tracing::debug!(?invalid, "rejected unknown diagnosis codes");
        return Err(ParseError::InvalidDiagnosisCodes(invalid));
    }

    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reference() -> DiagnosisSet {
        DiagnosisSet::bundled().expect("bundled diagnoses")
    }

    #[test]
    fn bundled_dataset_loads() {
        let set = reference();
        assert_eq!(set.len(), 15);
        assert!(set.contains("S62.5"));
        assert!(!set.contains("ZZZ.9"));
        let z57 = set.all().iter().find(|d| d.code == "Z57.1").expect("Z57.1");
        assert!(z57.latin.is_none());
    }

    #[test]
    fn absent_key_yields_no_codes() {
        let codes = validate_diagnosis_codes(&json!({ "description": "d" }), &reference())
            .expect("absent key is allowed");
        assert!(codes.is_empty());
    }

    #[test]
    fn keeps_order_and_duplicates() {
        let input = json!({ "diagnosisCodes": ["Z74.3", "M51.2", "Z74.3"] });
        let codes = validate_diagnosis_codes(&input, &reference()).expect("valid codes");
        assert_eq!(codes, vec!["Z74.3", "M51.2", "Z74.3"]);
    }

    #[test]
    fn reports_every_invalid_code() {
        let input = json!({ "diagnosisCodes": ["ZZZ.9", "M51.2", "AAA.1", 7] });
        let err = validate_diagnosis_codes(&input, &reference()).expect_err("invalid codes");
        assert_eq!(
            err,
            ParseError::InvalidDiagnosisCodes(vec!["ZZZ.9".into(), "AAA.1".into(), "7".into()])
        );
        assert_eq!(err.to_string(), "Invalid diagnosis code: ZZZ.9,AAA.1,7");
    }

    #[test]
    fn rejects_non_array_codes() {
        let err = validate_diagnosis_codes(&json!({ "diagnosisCodes": "M51.2" }), &reference())
            .expect_err("string is not a list");
        assert_eq!(err, ParseError::MissingOrIncorrect("diagnosis codes"));
    }

    #[test]
    fn reference_set_rejects_duplicates_and_empty_lists() {
        let dup = vec![
            Diagnosis { code: "A".into(), name: "a".into(), latin: None },
            Diagnosis { code: "A".into(), name: "b".into(), latin: None },
        ];
        assert!(matches!(
            DiagnosisSet::new(dup),
            Err(ConfigError::InvalidInput(msg)) if msg.contains("duplicate")
        ));
        assert!(matches!(
            DiagnosisSet::new(Vec::new()),
            Err(ConfigError::InvalidInput(msg)) if msg.contains("empty")
        ));
    }

    #[test]
    fn from_json_reports_malformed_datasets() {
        let err = DiagnosisSet::from_json("{\"code\": 1}").expect_err("not an array");
        assert!(matches!(err, ConfigError::Deserialization(_)));
    }
}
