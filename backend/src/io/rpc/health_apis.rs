use axum::{routing::get, Json, Router};
use chrono::Utc;
use shared::HealthStatus;
use tracing::info;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/healthcheck", get(healthcheck))
}

/// Liveness probe, independent of the database
pub async fn healthcheck() -> Json<HealthStatus> {
    info!("GET /rpc/healthcheck");

    Json(HealthStatus {
        status: "ok".to_string(),
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rpc::test_support::{get_json, setup_test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_healthcheck() {
        let app = setup_test_app().await;
        let before = Utc::now();

        let (status, body) = get_json(&app, "/rpc/healthcheck").await;

        assert_eq!(status, StatusCode::OK);
        let health: HealthStatus = serde_json::from_value(body).unwrap();
        assert_eq!(health.status, "ok");
        assert!(health.timestamp >= before);
    }

    #[tokio::test]
    async fn test_unknown_procedure() {
        let app = setup_test_app().await;

        let (status, _) = get_json(&app, "/rpc/deletePatient").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
