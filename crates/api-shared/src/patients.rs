//! Wire types for the patient record API.

use premium_core::{PatientInput, PatientRecord, PatientUpdate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PatientReq {
    /// The ID of the patient
    #[schema(example = "P001")]
    pub id: String,
    #[schema(example = "Ananya Verma")]
    pub name: String,
    #[schema(example = "Guwahati")]
    pub city: String,
    /// Age in years, 1 to 119
    #[schema(example = 28)]
    pub age: i64,
    /// One of male, female, others
    #[schema(example = "female")]
    pub gender: String,
    /// Height in metres
    #[schema(example = 1.65)]
    pub height: f64,
    /// Weight in kg
    #[schema(example = 90.0)]
    pub weight: f64,
}

impl PatientReq {
    /// Splits the request into the id and the fields to validate.
    pub fn into_parts(self) -> (String, PatientInput) {
        (
            self.id,
            PatientInput {
                name: self.name,
                city: self.city,
                age: self.age,
                gender: self.gender,
                height: self.height,
                weight: self.weight,
            },
        )
    }
}

/// Partial update; omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdatePatientReq {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl From<UpdatePatientReq> for PatientUpdate {
    fn from(req: UpdatePatientReq) -> Self {
        PatientUpdate {
            name: req.name,
            city: req.city,
            age: req.age,
            gender: req.gender,
            height: req.height,
            weight: req.weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    #[schema(example = "P001")]
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: u32,
    #[schema(example = "female")]
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    /// weight / height², rounded to two decimals
    #[schema(example = 33.06)]
    pub bmi: f64,
    /// Underweight, Normal or Obese
    #[schema(example = "Obese")]
    pub verdict: String,
}

impl From<PatientRecord> for PatientRes {
    fn from(record: PatientRecord) -> Self {
        let d = record.details;
        Self {
            id: record.id.into_string(),
            name: d.name().to_string(),
            city: d.city().to_string(),
            age: d.age(),
            gender: d.gender().as_str().to_string(),
            height: d.height(),
            weight: d.weight(),
            bmi: d.bmi(),
            verdict: d.verdict().as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ViewPatientRes {
    pub patient: PatientRes,
}

/// Every patient keyed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListPatientsRes {
    pub patients: BTreeMap<String, PatientRes>,
}

impl FromIterator<PatientRecord> for ListPatientsRes {
    fn from_iter<I: IntoIterator<Item = PatientRecord>>(iter: I) -> Self {
        Self {
            patients: iter
                .into_iter()
                .map(PatientRes::from)
                .map(|p| (p.id.clone(), p))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortParams {
    /// Sort on the basis of height, weight or bmi
    pub sort_by: String,
    /// Sort order: asc or desc
    #[serde(default = "default_order")]
    pub order: String,
}

fn default_order() -> String {
    "asc".into()
}
