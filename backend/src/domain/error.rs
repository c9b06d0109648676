use shared::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error("Patient with id {0} not found")]
    PatientNotFound(i64),

    #[error("{entity} with id {id} not found")]
    RecordNotFound { entity: &'static str, id: i64 },

    #[error(transparent)]
    InvalidInput(#[from] ValidationErrors),

    #[error("Storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

pub type ClinicResult<T> = Result<T, ClinicError>;

impl ClinicError {
    /// Classify a failed write that references `patient_id`.
    ///
    /// A foreign key rejection means the patient does not exist; anything else is
    /// a storage failure.
    pub fn from_patient_write(err: anyhow::Error, patient_id: i64) -> Self {
        if is_foreign_key_violation(&err) {
            ClinicError::PatientNotFound(patient_id)
        } else {
            ClinicError::Storage(err)
        }
    }
}

fn is_foreign_key_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|db_err| db_err.is_foreign_key_violation() || db_err.message().contains("FOREIGN KEY"))
        .unwrap_or(false)
}
