//! Constants used throughout the premium core crate.

/// Default path of the flat JSON patient store.
pub const DEFAULT_PATIENTS_FILE: &str = "patients.json";

/// Default path of the exported insurance classifier.
pub const DEFAULT_MODEL_PATH: &str = "model/insurance_model.json";

/// Version reported by the insurance health endpoint.
pub const MODEL_API_VERSION: &str = "1.0.0";

/// Exclusive upper bound on age for insurance quotes.
pub const INSURANCE_MAX_AGE: u32 = 75;

/// Exclusive upper bound on height (metres) for insurance quotes.
pub const INSURANCE_MAX_HEIGHT_M: f64 = 2.5;

/// Exclusive upper bound on patient age.
pub const PATIENT_MAX_AGE: u32 = 120;

/// Decimal places kept on each class probability in a prediction.
pub const PROBABILITY_DECIMALS: i32 = 4;

/// Decimal places kept on the patient BMI.
pub const PATIENT_BMI_DECIMALS: i32 = 2;
