//! Wire types for the insurance premium API.

use crate::lenient::bool_from_any;
use premium_core::{Prediction, RawUserInput};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Quote request. Field names match what the model was trained on.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PredictReq {
    /// Age of the user, 1 to 74
    #[schema(example = 30)]
    pub age: i64,
    /// Weight of the user in kg
    #[schema(example = 65.0)]
    pub weight: f64,
    /// Height of the user in metres, below 2.5
    #[schema(example = 1.7)]
    pub height: f64,
    /// Income of the user in lakhs per annum
    #[serde(alias = "income")]
    #[schema(example = 10.0)]
    pub income_lpa: f64,
    /// Whether the user smokes; also accepts "yes"/"no"
    #[serde(deserialize_with = "bool_from_any")]
    #[schema(value_type = bool, example = false)]
    pub smoker: bool,
    #[schema(example = "Mumbai")]
    pub city: String,
    /// One of retired, freelancer, student, government_job, business_owner, unemployed,
    /// private_job
    #[schema(example = "private_job")]
    pub occupation: String,
}

impl From<PredictReq> for RawUserInput {
    fn from(req: PredictReq) -> Self {
        RawUserInput {
            age: req.age,
            weight: req.weight,
            height: req.height,
            income_lpa: req.income_lpa,
            smoker: req.smoker,
            city: req.city,
            occupation: req.occupation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionRes {
    /// Predicted insurance premium category
    #[schema(example = "Low")]
    pub predicted_category: String,
    /// Probability of the predicted category
    #[schema(example = 0.8)]
    pub confidence: f64,
    /// Probability of every category, rounded to four decimals
    pub class_probabilities: BTreeMap<String, f64>,
}

impl From<Prediction> for PredictionRes {
    fn from(p: Prediction) -> Self {
        Self {
            predicted_category: p.predicted_category,
            confidence: p.confidence,
            class_probabilities: p.class_probabilities,
        }
    }
}

/// `/predict` body: the prediction wrapped under `response`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictRes {
    pub response: PredictionRes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    #[schema(example = "OK")]
    pub status: String,
    #[schema(example = "Loaded")]
    pub model_status: String,
    #[schema(example = "1.0.0")]
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_req_accepts_frontend_payload() {
        let req: PredictReq = serde_json::from_str(
            r#"{"age": 30, "weight": 65.0, "height": 1.7, "income_lpa": 10.0,
                "smoker": "yes", "city": "Mumbai", "occupation": "private_job"}"#,
        )
        .unwrap();
        let raw = RawUserInput::from(req);
        assert!(raw.smoker);
        assert_eq!(raw.income_lpa, 10.0);
    }

    #[test]
    fn test_predict_req_accepts_income_alias() {
        let req: PredictReq = serde_json::from_str(
            r#"{"age": 30, "weight": 65.0, "height": 1.7, "income": 7.5,
                "smoker": false, "city": "Pune", "occupation": "student"}"#,
        )
        .unwrap();
        assert_eq!(req.income_lpa, 7.5);
    }

    #[test]
    fn test_predict_req_requires_every_field() {
        let err = serde_json::from_str::<PredictReq>(
            r#"{"age": 30, "weight": 65.0, "height": 1.7, "income_lpa": 10.0,
                "smoker": false, "city": "Pune"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("occupation"));
    }
}
