use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use patientor_core::config::{resolve_diagnoses, seed_patients_from_env_value};
use patientor_core::constants::{
    DEFAULT_REST_ADDR, DIAGNOSES_FILE_ENV, REST_ADDR_ENV, SEED_PATIENTS_ENV,
};
use patientor_core::CoreConfig;

/// Main entry point for the Patientor application
///
/// Resolves configuration once, builds the in-memory patient store and serves the REST API.
///
/// # Environment Variables
/// - `PATIENTOR_REST_ADDR`: REST server address (default: "0.0.0.0:3001")
/// - `PATIENTOR_DIAGNOSES_FILE`: JSON file replacing the bundled diagnosis dataset
/// - `PATIENTOR_SEED_PATIENTS`: load the bundled demo patients (default: false)
/// - `RUST_LOG`: tracing filter
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patientor=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var(REST_ADDR_ENV).unwrap_or_else(|_| DEFAULT_REST_ADDR.into());
    let diagnoses_file = std::env::var_os(DIAGNOSES_FILE_ENV).map(PathBuf::from);
    let seed_patients = seed_patients_from_env_value(std::env::var(SEED_PATIENTS_ENV).ok())?;

    let diagnoses = resolve_diagnoses(diagnoses_file)?;
    tracing::info!("Loaded {} reference diagnoses", diagnoses.len());

    let config = CoreConfig::new(diagnoses, seed_patients);
    let store = config.build_store()?;

    tracing::info!("++ Starting Patientor REST on {}", rest_addr);

    let app = api_rest::router(store);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
