//! Insurance quote inputs and the enriched record handed to the classifier.
//!
//! The flow is `RawUserInput` -> [`validate_user_input`] -> [`normalize_city`] -> derived
//! features -> [`EnrichedRecord`] -> [`ModelFeatures`]. Records are built once per request and
//! never mutated.

use crate::city::{classify_city, CityTier};
use crate::features::{age_group, bmi, lifestyle_risk, AgeGroup, LifestyleRisk};
use crate::normalize::normalize_city;
use crate::validation::{validate_user_input, ValidationResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    Retired,
    Freelancer,
    Student,
    GovernmentJob,
    BusinessOwner,
    Unemployed,
    PrivateJob,
}

impl Occupation {
    pub const ALL: [Occupation; 7] = [
        Occupation::Retired,
        Occupation::Freelancer,
        Occupation::Student,
        Occupation::GovernmentJob,
        Occupation::BusinessOwner,
        Occupation::Unemployed,
        Occupation::PrivateJob,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Occupation::Retired => "retired",
            Occupation::Freelancer => "freelancer",
            Occupation::Student => "student",
            Occupation::GovernmentJob => "government_job",
            Occupation::BusinessOwner => "business_owner",
            Occupation::Unemployed => "unemployed",
            Occupation::PrivateJob => "private_job",
        }
    }
}

impl std::str::FromStr for Occupation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Occupation::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or(())
    }
}

/// Unvalidated quote request, as received from a client.
#[derive(Debug, Clone, PartialEq)]
pub struct RawUserInput {
    pub age: i64,
    pub weight: f64,
    pub height: f64,
    pub income_lpa: f64,
    pub smoker: bool,
    pub city: String,
    pub occupation: String,
}

/// A quote request that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInput {
    pub age: u32,
    pub weight: f64,
    pub height: f64,
    pub income_lpa: f64,
    pub smoker: bool,
    pub city: String,
    pub occupation: Occupation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    input: UserInput,
    bmi: f64,
    age_group: AgeGroup,
    lifestyle_risk: LifestyleRisk,
    city_tier: CityTier,
}

impl EnrichedRecord {
    /// Validates, normalizes and enriches a raw request.
    ///
    /// # Errors
    ///
    /// Returns the first field that failed validation. Nothing is derived on failure.
    pub fn from_raw(raw: RawUserInput) -> ValidationResult<Self> {
        let mut input = validate_user_input(raw)?;
        input.city = normalize_city(&input.city);
        Ok(Self::derive(input))
    }

    /// Derives the computed attributes. Expects `input.city` to be normalized already.
    pub fn derive(input: UserInput) -> Self {
        let bmi = bmi(input.weight, input.height);
        Self {
            bmi,
            age_group: age_group(input.age),
            lifestyle_risk: lifestyle_risk(input.smoker, bmi),
            city_tier: classify_city(&input.city),
            input,
        }
    }

    pub fn input(&self) -> &UserInput {
        &self.input
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn age_group(&self) -> AgeGroup {
        self.age_group
    }

    pub fn lifestyle_risk(&self) -> LifestyleRisk {
        self.lifestyle_risk
    }

    pub fn city_tier(&self) -> CityTier {
        self.city_tier
    }

    /// Maps the record onto the exact column names the classifier was trained with.
    pub fn model_features(&self) -> ModelFeatures {
        ModelFeatures {
            age: self.input.age,
            income_lpa: self.input.income_lpa,
            bmi: self.bmi,
            smoker: self.input.smoker,
            occupation: self.input.occupation,
            age_group: self.age_group,
            city_tier: self.city_tier,
            lifestyle_risk: self.lifestyle_risk,
        }
    }
}

/// Classifier input. Field names are part of the model contract; renaming one breaks
/// prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelFeatures {
    pub age: u32,
    pub income_lpa: f64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    pub smoker: bool,
    pub occupation: Occupation,
    #[serde(rename = "Age Group")]
    pub age_group: AgeGroup,
    #[serde(rename = "City Tier")]
    pub city_tier: CityTier,
    #[serde(rename = "Lifestyle Risk")]
    pub lifestyle_risk: LifestyleRisk,
}

/// A single model column value.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Category(String),
}

impl FeatureValue {
    /// Numeric view. Booleans are 0/1; categories have none.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(n) => Some(*n),
            FeatureValue::Category(_) => None,
        }
    }

    /// Category view. Numbers are rendered the way a one-hot encoder saw them in training
    /// (`3` rather than `3.0` for whole numbers).
    pub fn as_category(&self) -> String {
        match self {
            FeatureValue::Category(c) => c.clone(),
            FeatureValue::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
            FeatureValue::Number(n) => n.to_string(),
        }
    }
}

impl ModelFeatures {
    pub const NAMES: [&'static str; 8] = [
        "age",
        "income_lpa",
        "BMI",
        "smoker",
        "occupation",
        "Age Group",
        "City Tier",
        "Lifestyle Risk",
    ];

    /// Looks up a column by its model name.
    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        let value = match name {
            "age" => FeatureValue::Number(f64::from(self.age)),
            "income_lpa" => FeatureValue::Number(self.income_lpa),
            "BMI" => FeatureValue::Number(self.bmi),
            "smoker" => FeatureValue::Number(if self.smoker { 1.0 } else { 0.0 }),
            "occupation" => FeatureValue::Category(self.occupation.as_str().to_string()),
            "Age Group" => FeatureValue::Category(self.age_group.as_str().to_string()),
            "City Tier" => FeatureValue::Number(f64::from(self.city_tier.as_u8())),
            "Lifestyle Risk" => FeatureValue::Category(self.lifestyle_risk.as_str().to_string()),
            _ => return None,
        };
        Some(value)
    }
}
