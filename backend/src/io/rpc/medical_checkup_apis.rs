//! # Medical checkup procedures

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use shared::{
    CreateMedicalCheckupInput, GetServicesByPatientIdInput, MedicalCheckup,
    UpdateMedicalCheckupInput,
};
use tracing::info;

use super::{ApiError, RpcJson, RpcQuery};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/createMedicalCheckup", post(create_medical_checkup))
        .route("/getMedicalCheckups", get(get_medical_checkups))
        .route("/getMedicalCheckupsByPatient", get(get_medical_checkups_by_patient))
        .route("/updateMedicalCheckup", post(update_medical_checkup))
}

pub async fn create_medical_checkup(
    State(state): State<AppState>,
    RpcJson(input): RpcJson<CreateMedicalCheckupInput>,
) -> Result<Json<MedicalCheckup>, ApiError> {
    info!("POST /rpc/createMedicalCheckup - input: {:?}", input);

    let checkup = state.medical_checkup_service.create_checkup(input).await?;
    Ok(Json(checkup))
}

pub async fn get_medical_checkups(
    State(state): State<AppState>,
) -> Result<Json<Vec<MedicalCheckup>>, ApiError> {
    info!("GET /rpc/getMedicalCheckups");

    let checkups = state.medical_checkup_service.list_checkups().await?;
    Ok(Json(checkups))
}

pub async fn get_medical_checkups_by_patient(
    State(state): State<AppState>,
    RpcQuery(input): RpcQuery<GetServicesByPatientIdInput>,
) -> Result<Json<Vec<MedicalCheckup>>, ApiError> {
    info!("GET /rpc/getMedicalCheckupsByPatient - input: {:?}", input);

    let checkups = state
        .medical_checkup_service
        .list_checkups_by_patient(input.patient_id)
        .await?;
    Ok(Json(checkups))
}

pub async fn update_medical_checkup(
    State(state): State<AppState>,
    RpcJson(input): RpcJson<UpdateMedicalCheckupInput>,
) -> Result<Json<MedicalCheckup>, ApiError> {
    info!("POST /rpc/updateMedicalCheckup - input: {:?}", input);

    let checkup = state.medical_checkup_service.update_checkup(input).await?;
    Ok(Json(checkup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rpc::test_support::{get_json, post_json, setup_test_app};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    async fn create_patient(app: &Router, name: &str) -> i64 {
        let (_, body) = post_json(
            app,
            "/rpc/createPatient",
            json!({
                "name": name,
                "date_of_birth": "1965-12-01",
                "gender": "male",
                "phone": null,
                "address": null
            }),
        )
        .await;
        body["id"].as_i64().unwrap()
    }

    fn checkup_body(patient_id: i64, checkup_date: &str) -> Value {
        json!({
            "patient_id": patient_id,
            "checkup_date": checkup_date,
            "checkup_type": "elderly",
            "weight": 61.3,
            "height": 158.5,
            "blood_pressure": "140/90",
            "temperature": 37.2,
            "heart_rate": 84,
            "symptoms": "Dizziness",
            "diagnosis": null,
            "treatment": null,
            "medication_prescribed": null,
            "doctor_name": "Dr. Sari",
            "next_checkup_date": "2024-06-01",
            "notes": null
        })
    }

    #[tokio::test]
    async fn test_checkups_by_patient_newest_first() {
        let app = setup_test_app().await;
        let patient_id = create_patient(&app, "Pak Harjo").await;
        let other_id = create_patient(&app, "Bu Ratna").await;

        for day in ["2024-02-15", "2024-03-01", "2024-01-30"] {
            let (status, _) =
                post_json(&app, "/rpc/createMedicalCheckup", checkup_body(patient_id, day)).await;
            assert_eq!(status, StatusCode::OK);
        }
        post_json(&app, "/rpc/createMedicalCheckup", checkup_body(other_id, "2024-04-01")).await;

        let (status, body) = get_json(
            &app,
            &format!("/rpc/getMedicalCheckupsByPatient?patientId={}", patient_id),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let checkups: Vec<MedicalCheckup> = serde_json::from_value(body).unwrap();
        let dates: Vec<String> = checkups.iter().map(|c| c.checkup_date.to_string()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-02-15", "2024-01-30"]);
        assert!(checkups.iter().all(|c| c.patient_id == patient_id));

        let (_, body) = get_json(&app, "/rpc/getMedicalCheckups").await;
        assert_eq!(body.as_array().map(|a| a.len()), Some(4));
    }

    #[tokio::test]
    async fn test_update_checkup() {
        let app = setup_test_app().await;
        let patient_id = create_patient(&app, "Pak Harjo").await;
        let (_, body) =
            post_json(&app, "/rpc/createMedicalCheckup", checkup_body(patient_id, "2024-03-01"))
                .await;
        let created: MedicalCheckup = serde_json::from_value(body).unwrap();

        let (status, body) = post_json(
            &app,
            "/rpc/updateMedicalCheckup",
            json!({ "id": created.id, "diagnosis": "Vertigo", "symptoms": null, "temperature": 36.9 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let updated: MedicalCheckup = serde_json::from_value(body).unwrap();
        assert_eq!(updated.diagnosis.as_deref(), Some("Vertigo"));
        assert_eq!(updated.symptoms, None);
        assert_eq!(updated.temperature, Some(36.9));
        assert_eq!(updated.weight, created.weight);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_checkup() {
        let app = setup_test_app().await;

        let (status, body) = post_json(
            &app,
            "/rpc/updateMedicalCheckup",
            json!({ "id": 999999, "notes": "n/a" }),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Medical checkup with id 999999 not found");
    }

    #[tokio::test]
    async fn test_invalid_measurements_rejected() {
        let app = setup_test_app().await;
        let patient_id = create_patient(&app, "Pak Harjo").await;

        let mut body = checkup_body(patient_id, "2024-03-01");
        body["heart_rate"] = json!(0);
        let (status, _) = post_json(&app, "/rpc/createMedicalCheckup", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut body = checkup_body(patient_id, "2024-03-01");
        body["weight"] = json!(1500);
        let (status, _) = post_json(&app, "/rpc/createMedicalCheckup", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut body = checkup_body(patient_id, "2024-03-01");
        body["checkup_date"] = json!("01/03/2024");
        let (status, _) = post_json(&app, "/rpc/createMedicalCheckup", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = get_json(&app, "/rpc/getMedicalCheckups").await;
        assert_eq!(body, json!([]));
    }
}
