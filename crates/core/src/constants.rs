//! Constants used throughout the Patientor core crate.

/// Default listen address for the REST API.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3001";

/// Environment variable holding the REST listen address.
pub const REST_ADDR_ENV: &str = "PATIENTOR_REST_ADDR";

/// Environment variable naming a JSON file that replaces the bundled diagnosis dataset.
pub const DIAGNOSES_FILE_ENV: &str = "PATIENTOR_DIAGNOSES_FILE";

/// Environment variable enabling the bundled demo patients (`true`/`false`).
pub const SEED_PATIENTS_ENV: &str = "PATIENTOR_SEED_PATIENTS";
