//! Core records to wire shapes.

use api_shared::wire;
use patientor_core::{Diagnosis, Entry, EntryDetails, Patient, PatientSummary};

pub(crate) fn diagnosis_res(diagnosis: &Diagnosis) -> wire::DiagnosisRes {
    wire::DiagnosisRes {
        code: diagnosis.code.clone(),
        name: diagnosis.name.clone(),
        latin: diagnosis.latin.clone(),
    }
}

pub(crate) fn entry_res(entry: &Entry) -> wire::EntryRes {
    let new = &entry.entry;
    let mut res = wire::EntryRes {
        id: entry.id.clone(),
        description: new.description.to_string(),
        date: new.date.to_string(),
        specialist: new.specialist.to_string(),
        entry_type: new.details.entry_type().as_wire().to_string(),
        diagnosis_codes: new.diagnosis_codes.clone(),
        health_check_rating: None,
        discharge: None,
        employer_name: None,
        sick_leave: None,
    };

    match &new.details {
        EntryDetails::HealthCheck {
            health_check_rating,
        } => {
            res.health_check_rating = health_check_rating.map(|rating| rating.code());
        }
        EntryDetails::Hospital { discharge } => {
            res.discharge = discharge.as_ref().map(|d| wire::DischargeRes {
                date: d.date.to_string(),
                criteria: d.criteria.to_string(),
            });
        }
        EntryDetails::OccupationalHealthcare {
            employer_name,
            sick_leave,
        } => {
            res.employer_name = employer_name.as_ref().map(|name| name.to_string());
            res.sick_leave = sick_leave.as_ref().map(|s| wire::SickLeaveRes {
                start_date: s.start_date.to_string(),
                end_date: s.end_date.to_string(),
            });
        }
    }

    res
}

pub(crate) fn summary_res(patient: &PatientSummary) -> wire::PatientSummaryRes {
    wire::PatientSummaryRes {
        id: patient.id.clone(),
        name: patient.name.to_string(),
        date_of_birth: patient.date_of_birth.to_string(),
        gender: patient.gender.as_wire().to_string(),
        occupation: patient.occupation.to_string(),
        entries: patient.entries.iter().map(entry_res).collect(),
    }
}

pub(crate) fn patient_res(patient: &Patient) -> wire::PatientRes {
    wire::PatientRes {
        id: patient.id.clone(),
        name: patient.name.to_string(),
        date_of_birth: patient.date_of_birth.to_string(),
        ssn: patient.ssn.to_string(),
        gender: patient.gender.as_wire().to_string(),
        occupation: patient.occupation.to_string(),
        entries: patient.entries.iter().map(entry_res).collect(),
    }
}
