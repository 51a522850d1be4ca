//! In-memory patient store.
//!
//! The store owns every patient and, through them, every entry. It lives for the lifetime of the
//! process; nothing is persisted. Create operations parse and append under a single write lock,
//! so a request's validate-then-append sequence never interleaves with another writer.

use crate::diagnoses::{Diagnosis, DiagnosisSet};
use crate::entry::{parse_new_entry, Entry, NewEntry};
use crate::error::{StoreError, StoreResult};
use crate::patient::{parse_new_patient, NewPatient, Patient, PatientSummary};
use serde_json::Value;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Allocate a fresh identifier: 32 lowercase hex characters, no hyphens.
fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Cloneable handle to the shared patient collection.
#[derive(Clone, Debug)]
pub struct PatientStore {
    patients: Arc<RwLock<Vec<Patient>>>,
    diagnoses: Arc<DiagnosisSet>,
}

impl PatientStore {
    pub fn new(diagnoses: Arc<DiagnosisSet>) -> Self {
        Self {
            patients: Arc::new(RwLock::new(Vec::new())),
            diagnoses,
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<Patient>>> {
        self.patients.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<Patient>>> {
        self.patients.write().map_err(|_| StoreError::Poisoned)
    }

    /// The reference diagnoses, in dataset order.
    pub fn diagnoses(&self) -> &[Diagnosis] {
        self.diagnoses.all()
    }

    /// All patients, without `ssn`, in insertion order.
    pub fn list_patients(&self) -> StoreResult<Vec<PatientSummary>> {
        Ok(self.read()?.iter().map(Patient::summary).collect())
    }

    /// Look up a patient by id. A miss is `Ok(None)`, not an error.
    pub fn find_patient(&self, id: &str) -> StoreResult<Option<Patient>> {
        Ok(self.read()?.iter().find(|p| p.id == id).cloned())
    }

    pub fn add_patient(&self, new: NewPatient) -> StoreResult<Patient> {
        let mut patients = self.write()?;
        Ok(Self::push_patient(&mut patients, new))
    }

    /// Append an already-validated entry to a patient.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PatientNotFound`] if no patient has `patient_id`.
    pub fn add_entry(&self, patient_id: &str, new: NewEntry) -> StoreResult<Entry> {
        let mut patients = self.write()?;
        Self::push_entry(&mut patients, patient_id, new)
    }

    /// Parse a new-patient payload and store it.
    pub fn create_patient(&self, input: &Value) -> StoreResult<Patient> {
        let mut patients = self.write()?;
        let new = parse_new_patient(input)?;
        Ok(Self::push_patient(&mut patients, new))
    }

    /// Parse an entry payload and append it to `patient_id`.
    ///
    /// The payload is validated before the patient is looked up, so a malformed payload is
    /// reported as such even when the patient does not exist.
    pub fn create_entry(&self, patient_id: &str, input: &Value) -> StoreResult<Entry> {
        let mut patients = self.write()?;
        let new = parse_new_entry(input, &self.diagnoses)?;
        Self::push_entry(&mut patients, patient_id, new)
    }

    fn push_patient(patients: &mut Vec<Patient>, new: NewPatient) -> Patient {
        let patient = Patient::from_new(new_id(), new);
        tracing::info!(patient_id = %patient.id, "patient added");
        patients.push(patient.clone());
        patient
    }

    fn push_entry(patients: &mut [Patient], patient_id: &str, new: NewEntry) -> StoreResult<Entry> {
        let patient = patients
            .iter_mut()
            .find(|p| p.id == patient_id)
            .ok_or_else(|| StoreError::PatientNotFound(patient_id.to_string()))?;

        let entry = Entry {
            id: new_id(),
            entry: new,
        };
        tracing::info!(
            patient_id = %patient.id,
            entry_id = %entry.id,
            entry_type = %entry.entry.details.entry_type(),
            "entry added"
        );
        patient.entries.push(entry.clone());
        Ok(entry)
    }
}
