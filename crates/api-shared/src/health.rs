use crate::insurance::HealthRes;
use premium_core::MODEL_API_VERSION;

/// Health reporting for the insurance API.
///
/// Reports whether the prediction model was loaded at start-up. The service is considered
/// up either way; callers decide whether "Not Loaded" is fatal.
#[derive(Clone, Debug, Default)]
pub struct HealthService;

impl HealthService {
    pub const MODEL_LOADED: &'static str = "Loaded";
    pub const MODEL_NOT_LOADED: &'static str = "Not Loaded";

    /// Builds the health response for the given model state.
    pub fn check_health(model_loaded: bool) -> HealthRes {
        HealthRes {
            status: "OK".into(),
            model_status: if model_loaded {
                Self::MODEL_LOADED
            } else {
                Self::MODEL_NOT_LOADED
            }
            .into(),
            version: MODEL_API_VERSION.into(),
        }
    }
}
