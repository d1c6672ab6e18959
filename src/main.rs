use std::sync::Arc;

use api_rest::{insurance, patients, InsuranceState, PatientsState};
use axum::Router;
use premium_core::{try_load_model, CoreConfig, PatientService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the premium services
///
/// Starts both REST services concurrently:
/// - insurance premium prediction on port 8000 (configurable via PREMIUM_INSURANCE_ADDR)
/// - patient records on port 8001 (configurable via PREMIUM_PATIENTS_ADDR)
///
/// A missing or unreadable model does not stop start-up; `/health` reports it and
/// `/predict` answers 503 until the service is restarted with a valid model.
///
/// # Environment Variables
/// - `PREMIUM_INSURANCE_ADDR`: insurance API address (default: "0.0.0.0:8000")
/// - `PREMIUM_PATIENTS_ADDR`: patient API address (default: "0.0.0.0:8001")
/// - `PATIENTS_FILE`: JSON file holding patient records (default: "patients.json")
/// - `PREMIUM_MODEL_PATH`: exported model parameters (default: "model/insurance_model.json")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configured paths are invalid,
/// - either address cannot be bound, or
/// - either HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("premium_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("premium_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let insurance_addr =
        std::env::var("PREMIUM_INSURANCE_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let patients_addr =
        std::env::var("PREMIUM_PATIENTS_ADDR").unwrap_or_else(|_| "0.0.0.0:8001".into());

    let cfg = Arc::new(CoreConfig::from_env_values(
        std::env::var("PATIENTS_FILE").ok(),
        std::env::var("PREMIUM_MODEL_PATH").ok(),
    )?);

    let model = try_load_model(cfg.model_path());

    let insurance_app = insurance::router(InsuranceState::new(model));
    let patients_app = patients::router(PatientsState::new(PatientService::new(cfg.clone())));

    tracing::info!("++ Starting insurance API on {}", insurance_addr);
    tracing::info!(
        "++ Starting patient API on {} (store: {})",
        patients_addr,
        cfg.patients_file().display()
    );

    tokio::try_join!(
        serve(insurance_addr, insurance_app),
        serve(patients_addr, patients_app),
    )?;

    Ok(())
}

async fn serve(addr: String, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
