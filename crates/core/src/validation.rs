//! Input validation utilities.
//!
//! Every check here has fixed bounds. A failing check names the offending field and the
//! constraint it violated so callers can surface both to the client.

use crate::constants::{INSURANCE_MAX_AGE, INSURANCE_MAX_HEIGHT_M, PATIENT_MAX_AGE};
use crate::insurance::{Occupation, RawUserInput, UserInput};
use crate::patient::Gender;

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Rejects NaN and infinities before any range check runs.
fn require_finite(field: &'static str, value: f64) -> ValidationResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::new(field, "must be a finite number"))
    }
}

/// Checks `value > 0`.
pub fn require_positive(field: &'static str, value: f64) -> ValidationResult<f64> {
    let value = require_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::new(field, "must be greater than 0"))
    }
}

/// Checks `0 < value < upper` for floats.
pub fn require_open_range(field: &'static str, value: f64, upper: f64) -> ValidationResult<f64> {
    let value = require_positive(field, value)?;
    if value < upper {
        Ok(value)
    } else {
        Err(ValidationError::new(
            field,
            format!("must be less than {}", upper),
        ))
    }
}

/// Checks `0 < value < upper` for integers and narrows to `u32`.
pub fn require_age(field: &'static str, value: i64, upper: u32) -> ValidationResult<u32> {
    if value <= 0 {
        return Err(ValidationError::new(field, "must be greater than 0"));
    }
    if value >= i64::from(upper) {
        return Err(ValidationError::new(
            field,
            format!("must be less than {}", upper),
        ));
    }
    u32::try_from(value).map_err(|_| ValidationError::new(field, "out of range"))
}

pub fn parse_occupation(value: &str) -> ValidationResult<Occupation> {
    value.parse::<Occupation>().map_err(|_| {
        ValidationError::new(
            "occupation",
            format!(
                "must be one of: {}",
                Occupation::ALL
                    .iter()
                    .map(Occupation::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        )
    })
}

pub fn parse_gender(value: &str) -> ValidationResult<Gender> {
    value
        .parse::<Gender>()
        .map_err(|_| ValidationError::new("gender", "must be one of: male, female, others"))
}

/// Validates a raw insurance request.
///
/// The city is returned exactly as supplied; normalization is a separate step.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered, checked in field order.
pub fn validate_user_input(raw: RawUserInput) -> ValidationResult<UserInput> {
    let age = require_age("age", raw.age, INSURANCE_MAX_AGE)?;
    let weight = require_positive("weight", raw.weight)?;
    let height = require_open_range("height", raw.height, INSURANCE_MAX_HEIGHT_M)?;
    let income_lpa = require_positive("income_lpa", raw.income_lpa)?;
    let occupation = parse_occupation(&raw.occupation)?;

    Ok(UserInput {
        age,
        weight,
        height,
        income_lpa,
        smoker: raw.smoker,
        city: raw.city,
        occupation,
    })
}

/// Validates the measurable patient fields shared by create and update.
pub fn validate_patient_measurements(
    age: i64,
    height: f64,
    weight: f64,
) -> ValidationResult<(u32, f64, f64)> {
    let age = require_age("age", age, PATIENT_MAX_AGE)?;
    let height = require_positive("height", height)?;
    let weight = require_positive("weight", weight)?;
    Ok((age, height, weight))
}
