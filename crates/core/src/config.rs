//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! request handling never reads process-wide environment variables.

use crate::diagnoses::DiagnosisSet;
use crate::error::{ConfigError, ConfigResult};
use crate::seed;
use crate::store::PatientStore;
use std::path::PathBuf;
use std::sync::Arc;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    diagnoses: Arc<DiagnosisSet>,
    seed_patients: bool,
}

impl CoreConfig {
    pub fn new(diagnoses: DiagnosisSet, seed_patients: bool) -> Self {
        Self {
            diagnoses: Arc::new(diagnoses),
            seed_patients,
        }
    }

    pub fn diagnoses(&self) -> Arc<DiagnosisSet> {
        Arc::clone(&self.diagnoses)
    }

    pub fn seed_patients(&self) -> bool {
        self.seed_patients
    }

    /// Build the patient store this configuration describes, seeding it if requested.
    pub fn build_store(&self) -> ConfigResult<PatientStore> {
        let store = PatientStore::new(self.diagnoses());
        if self.seed_patients {
            seed::seed_bundled(&store)?;
        }
        Ok(store)
    }
}

/// Resolve the diagnosis reference set without reading environment variables.
///
/// With `override_file` the dataset is loaded from that JSON file; otherwise the bundled dataset
/// is used.
pub fn resolve_diagnoses(override_file: Option<PathBuf>) -> ConfigResult<DiagnosisSet> {
    match override_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading diagnoses from file");
            DiagnosisSet::load(&path)
        }
        None => DiagnosisSet::bundled(),
    }
}

/// Parse the seed flag from an optional string value.
///
/// `None` or blank means `false`.
pub fn seed_patients_from_env_value(value: Option<String>) -> ConfigResult<bool> {
    let value = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        None | Some("false") | Some("0") | Some("no") => Ok(false),
        Some("true") | Some("1") | Some("yes") => Ok(true),
        Some(other) => Err(ConfigError::InvalidInput(format!(
            "seed flag must be true or false, got '{other}'"
        ))),
    }
}
