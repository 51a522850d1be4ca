//! Demo patients bundled with the service.
//!
//! Seed records go through the same parsers as live submissions, so a malformed seed fails
//! startup instead of slipping past validation.

use crate::error::{ConfigError, ConfigResult, ParseError, StoreError};
use crate::store::PatientStore;
use serde_json::Value;

const BUNDLED_PATIENTS: &str = include_str!("../data/patients.json");

/// Load the bundled demo patients into `store`. Returns the number of patients added.
pub fn seed_bundled(store: &PatientStore) -> ConfigResult<usize> {
    seed_from_json(store, BUNDLED_PATIENTS)
}

/// Load patients from a JSON array of new-patient payloads, each with an optional `entries`
/// array of entry payloads.
pub fn seed_from_json(store: &PatientStore, text: &str) -> ConfigResult<usize> {
    let seeds: Vec<Value> =
        serde_json::from_str(text).map_err(ConfigError::SeedDeserialization)?;

    for (index, seed) in seeds.iter().enumerate() {
        let rejected = |source: StoreError| ConfigError::SeedRejected { index, source };

        let patient = store.create_patient(seed).map_err(rejected)?;

        let entries = match seed.get("entries") {
            None => &[][..],
            Some(Value::Array(entries)) => entries.as_slice(),
            Some(_) => {
                return Err(rejected(StoreError::Parse(ParseError::MissingOrIncorrect(
                    "entries",
                ))))
            }
        };
        for entry in entries {
            store.create_entry(&patient.id, entry).map_err(rejected)?;
        }
    }

    tracing::info!(count = seeds.len(), "seeded patients");
    Ok(seeds.len())
}
