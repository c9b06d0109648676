//! # Immunization procedures

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use shared::{CreateImmunizationInput, GetServicesByPatientIdInput, Immunization};
use tracing::info;

use super::{ApiError, RpcJson, RpcQuery};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/createImmunization", post(create_immunization))
        .route("/getImmunizations", get(get_immunizations))
        .route("/getImmunizationsByPatient", get(get_immunizations_by_patient))
}

pub async fn create_immunization(
    State(state): State<AppState>,
    RpcJson(input): RpcJson<CreateImmunizationInput>,
) -> Result<Json<Immunization>, ApiError> {
    info!("POST /rpc/createImmunization - input: {:?}", input);

    let immunization = state.immunization_service.create_immunization(input).await?;
    Ok(Json(immunization))
}

pub async fn get_immunizations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Immunization>>, ApiError> {
    info!("GET /rpc/getImmunizations");

    let immunizations = state.immunization_service.list_immunizations().await?;
    Ok(Json(immunizations))
}

pub async fn get_immunizations_by_patient(
    State(state): State<AppState>,
    RpcQuery(input): RpcQuery<GetServicesByPatientIdInput>,
) -> Result<Json<Vec<Immunization>>, ApiError> {
    info!("GET /rpc/getImmunizationsByPatient - input: {:?}", input);

    let immunizations = state
        .immunization_service
        .list_immunizations_by_patient(input.patient_id)
        .await?;
    Ok(Json(immunizations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rpc::test_support::{get_json, post_json, setup_test_app};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    fn immunization_body(patient_id: i64) -> Value {
        json!({
            "patient_id": patient_id,
            "vaccine_name": "BCG",
            "vaccine_type": "basic",
            "vaccination_date": "2024-01-02",
            "next_vaccination_date": null,
            "batch_number": "BCG-11",
            "administered_by": "Bidan Ani",
            "side_effects": null,
            "notes": null
        })
    }

    #[tokio::test]
    async fn test_create_and_list_immunizations() {
        let app = setup_test_app().await;
        let (_, patient) = post_json(
            &app,
            "/rpc/createPatient",
            json!({
                "name": "Bayu",
                "date_of_birth": "2023-11-02",
                "gender": "male",
                "phone": null,
                "address": null
            }),
        )
        .await;
        let patient_id = patient["id"].as_i64().unwrap();

        let (status, body) =
            post_json(&app, "/rpc/createImmunization", immunization_body(patient_id)).await;
        assert_eq!(status, StatusCode::OK);
        let immunization: Immunization = serde_json::from_value(body).unwrap();
        assert_eq!(immunization.vaccine_name, "BCG");
        assert_eq!(immunization.next_vaccination_date, None);

        let (_, body) = get_json(&app, "/rpc/getImmunizations").await;
        assert_eq!(body.as_array().map(|a| a.len()), Some(1));

        let (_, body) = get_json(
            &app,
            &format!("/rpc/getImmunizationsByPatient?patientId={}", patient_id + 1),
        )
        .await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_unknown_patient_rejected() {
        let app = setup_test_app().await;

        let (status, body) =
            post_json(&app, "/rpc/createImmunization", immunization_body(12345)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_vaccine_type_rejected() {
        let app = setup_test_app().await;
        let mut body = immunization_body(1);
        body["vaccine_type"] = json!("experimental");

        let (status, body) = post_json(&app, "/rpc/createImmunization", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }
}
