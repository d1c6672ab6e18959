//! Patient record endpoints.

use crate::error::ApiError;
use api_shared::{
    ErrorRes, ListPatientsRes, MessageRes, PatientReq, PatientRes, SortParams, UpdatePatientReq,
    ViewPatientRes,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use premium_core::{PatientService, SortField, SortOrder};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const MISSING_ON_WRITE: &str = "Patient ID does not exist";

/// Shared state for the patient handlers.
#[derive(Clone)]
pub struct PatientsState {
    pub patients: PatientService,
}

impl PatientsState {
    pub fn new(patients: PatientService) -> Self {
        Self { patients }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        home,
        about,
        view_patients,
        view_patient,
        sort_patients,
        create_patient,
        update_patient,
        delete_patient,
    ),
    components(schemas(
        MessageRes,
        ErrorRes,
        PatientReq,
        PatientRes,
        UpdatePatientReq,
        ViewPatientRes,
        ListPatientsRes,
    ))
)]
pub struct PatientsApiDoc;

/// Builds the patient router with Swagger UI and permissive CORS.
pub fn router(state: PatientsState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/view", get(view_patients))
        .route("/patients/:id", get(view_patient))
        .route("/sort", get(sort_patients))
        .route("/create", post(create_patient))
        .route("/edit/:id", put(update_patient))
        .route("/delete/:id", delete(delete_patient))
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", PatientsApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service name", body = MessageRes))
)]
#[axum::debug_handler]
async fn home() -> Json<MessageRes> {
    Json(MessageRes::new("Patient Management System API"))
}

#[utoipa::path(
    get,
    path = "/about",
    responses((status = 200, description = "Service description", body = MessageRes))
)]
#[axum::debug_handler]
async fn about() -> Json<MessageRes> {
    Json(MessageRes::new(
        "A fully functional API to manage your patients records",
    ))
}

#[utoipa::path(
    get,
    path = "/view",
    responses(
        (status = 200, description = "Every patient keyed by id", body = ListPatientsRes),
        (status = 500, description = "Store could not be read", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn view_patients(
    State(state): State<PatientsState>,
) -> Result<Json<ListPatientsRes>, ApiError> {
    let records = state.patients.list()?;
    Ok(Json(records.into_iter().collect()))
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "ID of the patient in the DB", example = "P001")),
    responses(
        (status = 200, description = "The patient", body = ViewPatientRes),
        (status = 404, description = "Patient ID not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn view_patient(
    State(state): State<PatientsState>,
    Path(id): Path<String>,
) -> Result<Json<ViewPatientRes>, ApiError> {
    let record = state.patients.view(&id)?;
    Ok(Json(ViewPatientRes {
        patient: record.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/sort",
    params(SortParams),
    responses(
        (status = 200, description = "Patients ordered by the chosen field", body = [PatientRes]),
        (status = 400, description = "Unknown sort field or order", body = ErrorRes)
    )
)]
/// Sorts on height, weight or bmi.
#[axum::debug_handler]
async fn sort_patients(
    State(state): State<PatientsState>,
    Query(params): Query<SortParams>,
) -> Result<Json<Vec<PatientRes>>, ApiError> {
    let field: SortField = params.sort_by.parse()?;
    let order: SortOrder = params.order.parse()?;

    let records = state.patients.sorted(field, order)?;
    Ok(Json(records.into_iter().map(PatientRes::from).collect()))
}

#[utoipa::path(
    post,
    path = "/create",
    request_body = PatientReq,
    responses(
        (status = 201, description = "Patient created successfully", body = MessageRes),
        (status = 400, description = "Patient Already exists", body = ErrorRes),
        (status = 422, description = "Invalid patient fields", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn create_patient(
    State(state): State<PatientsState>,
    Json(req): Json<PatientReq>,
) -> Result<(StatusCode, Json<MessageRes>), ApiError> {
    let (id, input) = req.into_parts();
    state.patients.create(&id, input)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageRes::new("Patient created successfully")),
    ))
}

#[utoipa::path(
    put,
    path = "/edit/{id}",
    params(("id" = String, Path, description = "ID of the patient to update")),
    request_body = UpdatePatientReq,
    responses(
        (status = 200, description = "Patient Info. Updated Successfully", body = MessageRes),
        (status = 404, description = "Patient ID does not exist", body = ErrorRes),
        (status = 422, description = "Merged record is invalid", body = ErrorRes)
    )
)]
/// Merges the supplied fields into the stored record and recomputes `bmi` and `verdict`.
#[axum::debug_handler]
async fn update_patient(
    State(state): State<PatientsState>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePatientReq>,
) -> Result<Json<MessageRes>, ApiError> {
    state
        .patients
        .update(&id, req.into())
        .map_err(ApiError::not_found_as(MISSING_ON_WRITE))?;
    Ok(Json(MessageRes::new("Patient Info. Updated Successfully")))
}

#[utoipa::path(
    delete,
    path = "/delete/{id}",
    params(("id" = String, Path, description = "ID of the patient to delete")),
    responses(
        (status = 200, description = "Patient Info. Deleted Successfully", body = MessageRes),
        (status = 404, description = "Patient ID does not exist", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn delete_patient(
    State(state): State<PatientsState>,
    Path(id): Path<String>,
) -> Result<Json<MessageRes>, ApiError> {
    state
        .patients
        .delete(&id)
        .map_err(ApiError::not_found_as(MISSING_ON_WRITE))?;
    Ok(Json(MessageRes::new("Patient Info. Deleted Successfully")))
}
