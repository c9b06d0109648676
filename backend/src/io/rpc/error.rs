use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{ApiErrorBody, ValidationErrors};
use tracing::{error, warn};

use crate::domain::ClinicError;

/// Failure of a procedure, rendered as `{ "error": ..., "code": ... }`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "BAD_REQUEST",
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "NOT_FOUND",
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "INTERNAL_SERVER_ERROR",
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        warn!("Rejected input: {}", errors);
        ApiError::bad_request(errors.to_string())
    }
}

impl From<ClinicError> for ApiError {
    fn from(err: ClinicError) -> Self {
        match err {
            ClinicError::InvalidInput(errors) => errors.into(),
            ClinicError::PatientNotFound(_) | ClinicError::RecordNotFound { .. } => {
                warn!("{}", err);
                ApiError::not_found(err.to_string())
            }
            ClinicError::Storage(ref source) => {
                error!("Storage failure: {:?}", source);
                ApiError::internal("Internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.message,
            code: self.code.to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_status() {
        let err = ApiError::from(ClinicError::PatientNotFound(5));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Patient with id 5 not found");

        let err = ApiError::from(ClinicError::Storage(anyhow::anyhow!("locked")));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, "INTERNAL_SERVER_ERROR");

        let err = ApiError::from(ClinicError::InvalidInput(ValidationErrors { errors: vec![] }));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
