//! JSON shapes returned by the REST API.
//!
//! These mirror the core records field for field but flatten the entry variants into a single
//! struct with optional fields, which is what the OpenAPI schema can describe. Absent optional
//! fields are omitted from the JSON rather than sent as `null`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DiagnosisRes {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latin: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DischargeRes {
    pub date: String,
    pub criteria: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SickLeaveRes {
    pub start_date: String,
    pub end_date: String,
}

/// One medical entry. `type` is `HealthCheck`, `Hospital` or `OccupationalHealthcare`; only the
/// fields of that variant can be present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryRes {
    pub id: String,
    pub description: String,
    pub date: String,
    pub specialist: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_codes: Option<Vec<String>>,
    /// 0 Healthy, 1 LowRisk, 2 HighRisk, 3 CriticalRisk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discharge: Option<DischargeRes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sick_leave: Option<SickLeaveRes>,
}

/// Patient without the sensitive `ssn`, as listed and as returned on creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummaryRes {
    pub id: String,
    pub name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub occupation: String,
    pub entries: Vec<EntryRes>,
}

/// Full patient record, including `ssn`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientRes {
    pub id: String,
    pub name: String,
    pub date_of_birth: String,
    pub ssn: String,
    pub gender: String,
    pub occupation: String,
    pub entries: Vec<EntryRes>,
}

/// Body of `POST /api/patients`. Documented shape only: submissions are validated field by field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPatientReq {
    pub name: String,
    pub date_of_birth: String,
    pub ssn: String,
    /// `male`, `female` or `other`.
    pub gender: String,
    pub occupation: String,
}

/// Body of `POST /api/patients/{id}/entries`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewEntryReq {
    pub description: String,
    pub date: String,
    pub specialist: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_codes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discharge: Option<DischargeRes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sick_leave: Option<SickLeaveRes>,
}
