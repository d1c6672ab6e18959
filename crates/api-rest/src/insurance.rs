//! Insurance premium prediction endpoints.

use crate::error::ApiError;
use api_shared::{ErrorRes, HealthRes, HealthService, MessageRes, PredictReq, PredictRes};
use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use premium_core::{predict_output, EnrichedRecord, ModelHandle, PremiumError};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Shared state for the insurance handlers.
///
/// `model` is `None` when no usable model was found at start-up; the service still runs and
/// reports the fact through `/health`.
#[derive(Clone, Default)]
pub struct InsuranceState {
    pub model: Option<ModelHandle>,
}

impl InsuranceState {
    pub fn new(model: Option<ModelHandle>) -> Self {
        Self { model }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(home, health, predict_premium),
    components(schemas(
        HealthRes,
        MessageRes,
        ErrorRes,
        PredictReq,
        PredictRes,
        api_shared::PredictionRes,
    ))
)]
pub struct InsuranceApiDoc;

/// Builds the insurance router with Swagger UI and permissive CORS.
pub fn router(state: InsuranceState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/predict", post(predict_premium))
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", InsuranceApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome message", body = MessageRes)
    )
)]
#[axum::debug_handler]
async fn home() -> Json<MessageRes> {
    Json(MessageRes::new(
        "Welcome to the Insurance Premium Prediction API",
    ))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service status and whether the model is loaded", body = HealthRes)
    )
)]
#[axum::debug_handler]
async fn health(State(state): State<InsuranceState>) -> Json<HealthRes> {
    Json(HealthService::check_health(state.model.is_some()))
}

#[utoipa::path(
    post,
    path = "/predict",
    request_body = PredictReq,
    responses(
        (status = 200, description = "Predicted premium category", body = PredictRes),
        (status = 422, description = "Invalid input", body = ErrorRes),
        (status = 503, description = "Model not loaded", body = ErrorRes),
        (status = 500, description = "Prediction failed", body = ErrorRes)
    )
)]
/// Validates the request, derives the model features and classifies them.
///
/// Validation runs first, so a bad request is rejected with 422 even when no model is
/// loaded.
#[axum::debug_handler]
async fn predict_premium(
    State(state): State<InsuranceState>,
    Json(req): Json<PredictReq>,
) -> Result<Json<PredictRes>, ApiError> {
    let record = EnrichedRecord::from_raw(req.into())?;

    let model = state.model.as_ref().ok_or(PremiumError::ModelUnavailable)?;
    let prediction = predict_output(model.as_ref(), &record.model_features())?;

    tracing::info!(
        "predicted {} for city tier {}",
        prediction.predicted_category,
        record.city_tier()
    );

    Ok(Json(PredictRes {
        response: prediction.into(),
    }))
}
