//! # Patientor Core
//!
//! Core business logic for the Patientor patient record service.
//!
//! This crate turns untrusted JSON into typed records and keeps them:
//! - type-narrowing guards over `serde_json::Value` ([`guards`])
//! - per-field parsers ([`fields`])
//! - the patient and entry parsers ([`parse_new_patient`], [`parse_new_entry`])
//! - diagnosis-code validation against the reference dataset ([`diagnoses`])
//! - the in-memory patient store ([`PatientStore`])
//!
//! **No API concerns**: HTTP servers and wire formats belong in `api-rest` and `api-shared`.

pub mod config;
pub mod constants;
pub mod diagnoses;
pub mod entry;
pub mod error;
pub mod fields;
pub mod guards;
pub mod patient;
pub mod seed;
pub mod store;

pub use config::CoreConfig;
pub use diagnoses::{validate_diagnosis_codes, Diagnosis, DiagnosisSet};
pub use entry::{
    parse_new_entry, Discharge, Entry, EntryDetails, EntryType, HealthCheckRating, NewEntry,
    SickLeave,
};
pub use error::{
    ConfigError, ConfigResult, ParseError, ParseResult, StoreError, StoreResult,
};
pub use patient::{parse_new_patient, Gender, NewPatient, Patient, PatientSummary};
pub use patientor_types::{DateText, NonEmptyText, TextError};
pub use store::PatientStore;
