//! Insurance premium classifier boundary.
//!
//! The service treats the classifier as a black box behind [`PremiumClassifier`]. A handle is
//! created once at start-up and passed to request handlers; when no model could be loaded the
//! handle is absent and prediction requests are refused with [`PremiumError::ModelUnavailable`].
//!
//! [`LogisticModel`] is the bundled implementation: a multinomial logistic regression exported
//! from the training pipeline as JSON.

use crate::constants::PROBABILITY_DECIMALS;
use crate::features::round_to;
use crate::insurance::{FeatureValue, ModelFeatures};
use crate::{PremiumError, PremiumResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

pub trait PremiumClassifier: Send + Sync {
    /// Class labels, in the same order as the probabilities returned by `predict_proba`.
    fn classes(&self) -> &[String];

    /// Per-class probabilities for one input row.
    fn predict_proba(&self, features: &ModelFeatures) -> PremiumResult<Vec<f64>>;
}

/// Shared, read-only classifier handle.
pub type ModelHandle = Arc<dyn PremiumClassifier>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub predicted_category: String,
    pub confidence: f64,
    pub class_probabilities: BTreeMap<String, f64>,
}

/// Runs the classifier and assembles the response.
///
/// `confidence` is the highest class probability, unrounded. Each entry of
/// `class_probabilities` is rounded to four decimals.
///
/// # Errors
///
/// Returns `PremiumError::Prediction` if the classifier fails or returns a malformed
/// probability vector.
pub fn predict_output(
    model: &dyn PremiumClassifier,
    features: &ModelFeatures,
) -> PremiumResult<Prediction> {
    let classes = model.classes();
    let probabilities = model.predict_proba(features)?;

    if probabilities.len() != classes.len() || classes.is_empty() {
        return Err(PremiumError::Prediction(format!(
            "classifier returned {} probabilities for {} classes",
            probabilities.len(),
            classes.len()
        )));
    }
    if probabilities.iter().any(|p| !p.is_finite()) {
        return Err(PremiumError::Prediction(
            "classifier returned a non-finite probability".into(),
        ));
    }

    let mut best = 0;
    for (i, p) in probabilities.iter().enumerate() {
        if *p > probabilities[best] {
            best = i;
        }
    }

    let class_probabilities = classes
        .iter()
        .zip(&probabilities)
        .map(|(class, p)| (class.clone(), round_to(*p, PROBABILITY_DECIMALS)))
        .collect();

    Ok(Prediction {
        predicted_category: classes[best].clone(),
        confidence: probabilities[best],
        class_probabilities,
    })
}

/// Loads the model at `path`, logging and returning `None` if it cannot be used.
pub fn try_load_model(path: &Path) -> Option<ModelHandle> {
    match LogisticModel::load(path) {
        Ok(model) => Some(Arc::new(model)),
        Err(e) => {
            tracing::warn!("model not loaded from {}: {}", path.display(), e);
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericFeature {
    pub name: String,
    pub mean: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalFeature {
    pub name: String,
    pub categories: Vec<String>,
}

/// Model parameters exported by the training pipeline.
///
/// The design-matrix column order is: every numeric feature (standardized), then the
/// one-hot columns of every categorical feature in listed order. A category unseen in
/// training encodes as all zeros.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedModel {
    pub classes: Vec<String>,
    #[serde(default)]
    pub numeric_features: Vec<NumericFeature>,
    #[serde(default)]
    pub categorical_features: Vec<CategoricalFeature>,
    /// One row per class, or a single row for a binary model (positive = second class).
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct LogisticModel {
    exported: ExportedModel,
    width: usize,
}

impl LogisticModel {
    /// Validates exported parameters.
    ///
    /// # Errors
    ///
    /// Returns `PremiumError::InvalidModel` if the classes, feature names or parameter shapes
    /// are inconsistent.
    pub fn new(exported: ExportedModel) -> PremiumResult<Self> {
        let n_classes = exported.classes.len();
        if n_classes < 2 {
            return Err(PremiumError::InvalidModel(
                "model must have at least two classes".into(),
            ));
        }
        let unique: HashSet<&String> = exported.classes.iter().collect();
        if unique.len() != n_classes {
            return Err(PremiumError::InvalidModel(
                "class labels must be unique".into(),
            ));
        }

        let names = exported
            .numeric_features
            .iter()
            .map(|f| f.name.as_str())
            .chain(exported.categorical_features.iter().map(|f| f.name.as_str()));
        for name in names {
            if !ModelFeatures::NAMES.contains(&name) {
                return Err(PremiumError::InvalidModel(format!(
                    "unknown feature '{name}'"
                )));
            }
        }
        for feature in &exported.numeric_features {
            if !feature.scale.is_finite() || feature.scale == 0.0 || !feature.mean.is_finite() {
                return Err(PremiumError::InvalidModel(format!(
                    "feature '{}' has an unusable mean/scale",
                    feature.name
                )));
            }
        }

        let width = exported.numeric_features.len()
            + exported
                .categorical_features
                .iter()
                .map(|f| f.categories.len())
                .sum::<usize>();

        let rows = exported.coefficients.len();
        let binary = n_classes == 2 && rows == 1;
        if rows != n_classes && !binary {
            return Err(PremiumError::InvalidModel(format!(
                "expected {} coefficient rows, found {}",
                n_classes, rows
            )));
        }
        if exported.intercepts.len() != rows {
            return Err(PremiumError::InvalidModel(format!(
                "expected {} intercepts, found {}",
                rows,
                exported.intercepts.len()
            )));
        }
        if let Some(row) = exported.coefficients.iter().find(|r| r.len() != width) {
            return Err(PremiumError::InvalidModel(format!(
                "coefficient row has {} entries, expected {}",
                row.len(),
                width
            )));
        }

        Ok(Self { exported, width })
    }

    /// Reads and validates a model exported as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ModelRead`, `ModelParse` (with the JSON path of the bad value) or
    /// `InvalidModel`.
    pub fn load(path: &Path) -> PremiumResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(PremiumError::ModelRead)?;
        let de = &mut serde_json::Deserializer::from_str(&raw);
        let exported: ExportedModel =
            serde_path_to_error::deserialize(de).map_err(PremiumError::ModelParse)?;
        let model = Self::new(exported)?;

        tracing::info!(
            "loaded model from {} (classes={:?}, n_columns={})",
            path.display(),
            model.exported.classes,
            model.width
        );
        Ok(model)
    }

    fn design_row(&self, features: &ModelFeatures) -> PremiumResult<Vec<f64>> {
        let mut row = Vec::with_capacity(self.width);

        for feature in &self.exported.numeric_features {
            let value = features
                .get(&feature.name)
                .and_then(|v| v.as_number())
                .ok_or_else(|| {
                    PremiumError::Prediction(format!(
                        "feature '{}' is not numeric",
                        feature.name
                    ))
                })?;
            row.push((value - feature.mean) / feature.scale);
        }

        for feature in &self.exported.categorical_features {
            let value = features
                .get(&feature.name)
                .as_ref()
                .map(FeatureValue::as_category)
                .ok_or_else(|| {
                    PremiumError::Prediction(format!("feature '{}' is missing", feature.name))
                })?;
            row.extend(
                feature
                    .categories
                    .iter()
                    .map(|c| if *c == value { 1.0 } else { 0.0 }),
            );
        }

        Ok(row)
    }
}

impl PremiumClassifier for LogisticModel {
    fn classes(&self) -> &[String] {
        &self.exported.classes
    }

    fn predict_proba(&self, features: &ModelFeatures) -> PremiumResult<Vec<f64>> {
        let row = self.design_row(features)?;
        let scores: Vec<f64> = self
            .exported
            .coefficients
            .iter()
            .zip(&self.exported.intercepts)
            .map(|(coef, intercept)| {
                intercept + coef.iter().zip(&row).map(|(c, x)| c * x).sum::<f64>()
            })
            .collect();

        if scores.len() == 1 {
            let positive = 1.0 / (1.0 + (-scores[0]).exp());
            return Ok(vec![1.0 - positive, positive]);
        }

        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        Ok(exps.into_iter().map(|e| e / total).collect())
    }
}
