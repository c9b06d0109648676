//! # Patient procedures

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use shared::{CreatePatientInput, GetPatientByIdInput, Patient, UpdatePatientInput};
use tracing::info;

use super::{ApiError, RpcJson, RpcQuery};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/createPatient", post(create_patient))
        .route("/getPatients", get(get_patients))
        .route("/getPatientById", get(get_patient_by_id))
        .route("/updatePatient", post(update_patient))
}

pub async fn create_patient(
    State(state): State<AppState>,
    RpcJson(input): RpcJson<CreatePatientInput>,
) -> Result<Json<Patient>, ApiError> {
    info!("POST /rpc/createPatient - input: {:?}", input);

    let patient = state.patient_service.create_patient(input).await?;
    Ok(Json(patient))
}

pub async fn get_patients(State(state): State<AppState>) -> Result<Json<Vec<Patient>>, ApiError> {
    info!("GET /rpc/getPatients");

    let patients = state.patient_service.list_patients().await?;
    Ok(Json(patients))
}

/// Answers `null` when no patient has the id
pub async fn get_patient_by_id(
    State(state): State<AppState>,
    RpcQuery(input): RpcQuery<GetPatientByIdInput>,
) -> Result<Json<Option<Patient>>, ApiError> {
    info!("GET /rpc/getPatientById - input: {:?}", input);

    let patient = state.patient_service.get_patient(input.id).await?;
    Ok(Json(patient))
}

pub async fn update_patient(
    State(state): State<AppState>,
    RpcJson(input): RpcJson<UpdatePatientInput>,
) -> Result<Json<Patient>, ApiError> {
    info!("POST /rpc/updatePatient - input: {:?}", input);

    let patient = state.patient_service.update_patient(input).await?;
    Ok(Json(patient))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rpc::test_support::{get_json, post_json, setup_test_app};
    use axum::http::StatusCode;
    use serde_json::{json, Value};
    use shared::{ApiErrorBody, Gender};

    fn patient_body() -> Value {
        json!({
            "name": "Siti Rahma",
            "date_of_birth": "1990-05-17",
            "gender": "female",
            "phone": "081234567890",
            "address": null
        })
    }

    #[tokio::test]
    async fn test_create_and_fetch_patient() {
        let app = setup_test_app().await;

        let (status, body) = post_json(&app, "/rpc/createPatient", patient_body()).await;
        assert_eq!(status, StatusCode::OK);
        let created: Patient = serde_json::from_value(body).unwrap();
        assert!(created.id > 0);
        assert_eq!(created.gender, Gender::Female);
        assert_eq!(created.address, None);

        let (status, body) =
            get_json(&app, &format!("/rpc/getPatientById?id={}", created.id)).await;
        assert_eq!(status, StatusCode::OK);
        let fetched: Patient = serde_json::from_value(body).unwrap();
        assert_eq!(fetched, created);

        let (_, body) = get_json(&app, "/rpc/getPatients").await;
        assert_eq!(body.as_array().map(|a| a.len()), Some(1));
    }

    #[tokio::test]
    async fn test_missing_patient_is_null() {
        let app = setup_test_app().await;

        let (status, body) = get_json(&app, "/rpc/getPatientById?id=999999").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_empty_list() {
        let app = setup_test_app().await;

        let (status, body) = get_json(&app, "/rpc/getPatients").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_invalid_patient_rejected() {
        let app = setup_test_app().await;

        let mut body = patient_body();
        body["gender"] = json!("unknown");
        let (status, response) = post_json(&app, "/rpc/createPatient", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiErrorBody = serde_json::from_value(response).unwrap();
        assert_eq!(error.code, "BAD_REQUEST");

        let mut body = patient_body();
        body["name"] = json!("");
        let (status, response) = post_json(&app, "/rpc/createPatient", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "Invalid input: name cannot be empty");

        let (status, _) = get_json(&app, "/rpc/getPatientById?id=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = get_json(&app, "/rpc/getPatients").await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_update_patient() {
        let app = setup_test_app().await;
        let (_, body) = post_json(&app, "/rpc/createPatient", patient_body()).await;
        let created: Patient = serde_json::from_value(body).unwrap();

        let (status, body) = post_json(
            &app,
            "/rpc/updatePatient",
            json!({ "id": created.id, "phone": null, "address": "Jl. Kenanga 7" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let updated: Patient = serde_json::from_value(body).unwrap();
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.phone, None);
        assert_eq!(updated.address.as_deref(), Some("Jl. Kenanga 7"));

        let (status, _) =
            post_json(&app, "/rpc/updatePatient", json!({ "id": created.id, "name": null })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) =
            post_json(&app, "/rpc/updatePatient", json!({ "id": 999999, "name": "X" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["error"], "Patient with id 999999 not found");
    }
}
