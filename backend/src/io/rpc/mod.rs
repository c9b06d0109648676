//! # RPC Procedures
//!
//! Each procedure is a route named after the operation it runs
//! (`/rpc/createPatient`, `/rpc/getMedicalCheckupsByPatient`, ...). Queries are
//! `GET` with their input in the query string, mutations are `POST` with a JSON
//! body. Every input is validated before the service is called, and every
//! failure is answered with an [`ApiError`] body.

pub mod delivery_service_apis;
pub mod error;
pub mod extract;
pub mod health_apis;
pub mod immunization_apis;
pub mod medical_checkup_apis;
pub mod patient_apis;

pub use error::ApiError;
pub use extract::{RpcJson, RpcQuery};

use axum::Router;

use crate::AppState;

/// All procedures, ready to be nested under `/rpc`
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health_apis::router())
        .merge(patient_apis::router())
        .merge(delivery_service_apis::router())
        .merge(immunization_apis::router())
        .merge(medical_checkup_apis::router())
}

#[cfg(test)]
pub(crate) mod test_support;
