//! Patient records and their derived health attributes.
//!
//! A record's `bmi` and `verdict` are computed when the record is built, from the rounded
//! BMI, and rebuilt whenever height or weight changes through [`PatientDetails::apply`].

use crate::constants::PATIENT_MAX_AGE;
use crate::features::{patient_bmi, verdict, Verdict};
use crate::validation::{
    parse_gender, require_age, require_positive, validate_patient_measurements, ValidationError,
    ValidationResult,
};
use crate::PremiumError;
use premium_types::PatientId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Others,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Others => "others",
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "others" => Ok(Gender::Others),
            _ => Err(()),
        }
    }
}

/// Unvalidated patient fields, as supplied on create.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientInput {
    pub name: String,
    pub city: String,
    pub age: i64,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl PatientUpdate {
    /// Checks the bounds of every supplied field on its own, without a stored record.
    ///
    /// # Errors
    ///
    /// Returns the first supplied field that is out of range.
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(age) = self.age {
            require_age("age", age, PATIENT_MAX_AGE)?;
        }
        if let Some(gender) = &self.gender {
            parse_gender(gender)?;
        }
        if let Some(height) = self.height {
            require_positive("height", height)?;
        }
        if let Some(weight) = self.weight {
            require_positive("weight", weight)?;
        }
        Ok(())
    }
}

/// The stored payload of a patient. The id is the store key and is not repeated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientDetails {
    name: String,
    city: String,
    age: u32,
    gender: Gender,
    height: f64,
    weight: f64,
    bmi: f64,
    verdict: Verdict,
}

impl PatientDetails {
    /// Validates the input and computes `bmi` and `verdict`.
    ///
    /// # Errors
    ///
    /// Returns the first field that failed validation.
    pub fn from_input(input: PatientInput) -> ValidationResult<Self> {
        let (age, height, weight) =
            validate_patient_measurements(input.age, input.height, input.weight)?;
        let gender = parse_gender(&input.gender)?;
        let bmi = patient_bmi(weight, height);

        Ok(Self {
            name: input.name,
            city: input.city,
            age,
            gender,
            height,
            weight,
            bmi,
            verdict: verdict(bmi),
        })
    }

    /// Merges `update` over these details and re-derives the computed fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the merged record is invalid; `self` is unchanged.
    pub fn apply(&self, update: PatientUpdate) -> ValidationResult<Self> {
        Self::from_input(PatientInput {
            name: update.name.unwrap_or_else(|| self.name.clone()),
            city: update.city.unwrap_or_else(|| self.city.clone()),
            age: update.age.unwrap_or(i64::from(self.age)),
            gender: update
                .gender
                .unwrap_or_else(|| self.gender.as_str().to_string()),
            height: update.height.unwrap_or(self.height),
            weight: update.weight.unwrap_or(self.weight),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn sort_key(&self, field: SortField) -> f64 {
        match field {
            SortField::Height => self.height,
            SortField::Weight => self.weight,
            SortField::Bmi => self.bmi,
        }
    }
}

/// A patient with its id re-attached, as returned to readers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRecord {
    pub id: PatientId,
    #[serde(flatten)]
    pub details: PatientDetails,
}

/// Validates the id of a new patient. The id is kept exactly as supplied.
pub fn parse_patient_id(id: &str) -> ValidationResult<PatientId> {
    PatientId::new(id).map_err(|e| ValidationError::new("id", e.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl std::str::FromStr for SortField {
    type Err = PremiumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "height" => Ok(SortField::Height),
            "weight" => Ok(SortField::Weight),
            "bmi" => Ok(SortField::Bmi),
            _ => Err(PremiumError::InvalidInput(
                "Invalid sort field choose from ['height', 'weight', 'bmi']".into(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = PremiumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(PremiumError::InvalidInput(
                "Invalid sort order choose from ['asc', 'desc']".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> PatientInput {
        PatientInput {
            name: "Ananya Verma".into(),
            city: "Guwahati".into(),
            age: 28,
            gender: "female".into(),
            height: 1.75,
            weight: 70.0,
        }
    }

    #[test]
    fn test_from_input_computes_rounded_bmi_and_verdict() {
        let details = PatientDetails::from_input(input()).unwrap();
        assert_eq!(details.bmi(), 22.86);
        assert_eq!(details.verdict(), Verdict::Normal);
        assert_eq!(details.gender(), Gender::Female);
    }

    #[test]
    fn test_from_input_rejects_invalid_fields() {
        let err = PatientDetails::from_input(PatientInput {
            gender: "robot".into(),
            ..input()
        })
        .unwrap_err();
        assert_eq!(err.field, "gender");

        let err = PatientDetails::from_input(PatientInput { age: 0, ..input() }).unwrap_err();
        assert_eq!(err.field, "age");
    }

    #[test]
    fn test_apply_recomputes_derived_fields() {
        let details = PatientDetails::from_input(input()).unwrap();
        let updated = details
            .apply(PatientUpdate {
                weight: Some(90.0),
                ..PatientUpdate::default()
            })
            .unwrap();

        assert_eq!(updated.weight(), 90.0);
        assert_eq!(updated.height(), 1.75);
        assert_eq!(updated.name(), "Ananya Verma");
        assert_eq!(updated.bmi(), 29.39);
        assert_eq!(updated.verdict(), Verdict::Obese);
    }

    #[test]
    fn test_apply_validates_merged_record() {
        let details = PatientDetails::from_input(input()).unwrap();
        let err = details
            .apply(PatientUpdate {
                height: Some(-1.0),
                ..PatientUpdate::default()
            })
            .unwrap_err();
        assert_eq!(err.field, "height");
    }

    #[test]
    fn test_record_serializes_flat_with_id() {
        let record = PatientRecord {
            id: parse_patient_id("P001").unwrap(),
            details: PatientDetails::from_input(input()).unwrap(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "P001");
        assert_eq!(json["gender"], "female");
        assert_eq!(json["verdict"], "Normal");
        assert_eq!(json["bmi"], 22.86);
    }

    #[test]
    fn test_stored_details_exclude_id() {
        let details = PatientDetails::from_input(input()).unwrap();
        let json = serde_json::to_value(&details).unwrap();
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_parse_patient_id_rejects_blank() {
        assert_eq!(parse_patient_id("  ").unwrap_err().field, "id");
        assert_eq!(parse_patient_id("P001 ").unwrap().as_str(), "P001 ");
    }

    #[test]
    fn test_update_validate_checks_supplied_fields_only() {
        assert!(PatientUpdate::default().validate().is_ok());

        let err = PatientUpdate {
            age: Some(150),
            ..PatientUpdate::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field, "age");

        let err = PatientUpdate {
            gender: Some("robot".into()),
            ..PatientUpdate::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field, "gender");
    }

    #[test]
    fn test_sort_params_parse() {
        assert_eq!("bmi".parse::<SortField>().unwrap(), SortField::Bmi);
        assert!(matches!(
            "age".parse::<SortField>(),
            Err(PremiumError::InvalidInput(_))
        ));
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("up".parse::<SortOrder>().is_err());
    }
}
