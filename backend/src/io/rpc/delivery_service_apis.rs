//! # Delivery service procedures

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use shared::{CreateDeliveryServiceInput, DeliveryService, GetServicesByPatientIdInput};
use tracing::info;

use super::{ApiError, RpcJson, RpcQuery};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/createDeliveryService", post(create_delivery_service))
        .route("/getDeliveryServices", get(get_delivery_services))
        .route("/getDeliveryServicesByPatient", get(get_delivery_services_by_patient))
}

pub async fn create_delivery_service(
    State(state): State<AppState>,
    RpcJson(input): RpcJson<CreateDeliveryServiceInput>,
) -> Result<Json<DeliveryService>, ApiError> {
    info!("POST /rpc/createDeliveryService - input: {:?}", input);

    let delivery = state.delivery_record_service.create_delivery(input).await?;
    Ok(Json(delivery))
}

pub async fn get_delivery_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<DeliveryService>>, ApiError> {
    info!("GET /rpc/getDeliveryServices");

    let deliveries = state.delivery_record_service.list_deliveries().await?;
    Ok(Json(deliveries))
}

pub async fn get_delivery_services_by_patient(
    State(state): State<AppState>,
    RpcQuery(input): RpcQuery<GetServicesByPatientIdInput>,
) -> Result<Json<Vec<DeliveryService>>, ApiError> {
    info!("GET /rpc/getDeliveryServicesByPatient - input: {:?}", input);

    let deliveries = state
        .delivery_record_service
        .list_deliveries_by_patient(input.patient_id)
        .await?;
    Ok(Json(deliveries))
}
