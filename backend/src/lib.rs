//! # Clinic Records Backend
//!
//! Server side of the clinic records application: patients, deliveries,
//! immunizations and medical checkups kept in SQLite and exposed as RPC
//! procedures over HTTP.
//!
//! ## Architecture
//!
//! ```text
//! UI (yew frontend)
//!     ↓
//! IO layer (RPC procedures, input extraction, error responses)
//!     ↓
//! Domain layer (one service per record type)
//!     ↓
//! Storage layer (SQLite repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{http::Method, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::Config;
use crate::domain::{
    DeliveryRecordService, ImmunizationService, MedicalCheckupService, PatientService,
};
use crate::storage::DbConnection;

/// Services shared by every request
#[derive(Clone)]
pub struct AppState {
    pub patient_service: PatientService,
    pub delivery_record_service: DeliveryRecordService,
    pub immunization_service: ImmunizationService,
    pub medical_checkup_service: MedicalCheckupService,
}

impl AppState {
    pub fn new(db: DbConnection) -> Self {
        Self {
            patient_service: PatientService::new(db.clone()),
            delivery_record_service: DeliveryRecordService::new(db.clone()),
            immunization_service: ImmunizationService::new(db.clone()),
            medical_checkup_service: MedicalCheckupService::new(db),
        }
    }
}

/// Open the database and build the services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    info!("Setting up application state");
    Ok(AppState::new(db))
}

/// Create the router with every procedure mounted under `/rpc`
pub fn create_router(app_state: AppState, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(config.client_origin.clone())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let mut app = Router::new().nest("/rpc", io::rpc::router());

    if let Some(static_dir) = &config.static_dir {
        info!("Serving UI from {}", static_dir.display());
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    app.layer(cors).with_state(app_state)
}
