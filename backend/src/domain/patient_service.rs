use shared::{CreatePatientInput, Patient, UpdatePatientInput, Validate};
use tracing::{info, warn};

use crate::domain::error::{ClinicError, ClinicResult};
use crate::storage::{codec, DbConnection, PatientRepository};

/// Service for registering and maintaining patients
#[derive(Clone)]
pub struct PatientService {
    repository: PatientRepository,
}

impl PatientService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            repository: PatientRepository::new(db),
        }
    }

    pub async fn create_patient(&self, input: CreatePatientInput) -> ClinicResult<Patient> {
        info!("Creating patient: name={}, date_of_birth={}", input.name, input.date_of_birth);

        input.validate()?;

        let patient = self.repository.insert(&input, codec::now()).await?;

        info!("Created patient: {} with ID: {}", patient.name, patient.id);
        Ok(patient)
    }

    pub async fn list_patients(&self) -> ClinicResult<Vec<Patient>> {
        info!("Listing all patients");

        let patients = self.repository.list().await?;

        info!("Found {} patients", patients.len());
        Ok(patients)
    }

    /// Look up a patient; a missing patient is `None`, not an error
    pub async fn get_patient(&self, id: i64) -> ClinicResult<Option<Patient>> {
        info!("Getting patient: {}", id);

        let patient = self.repository.get(id).await?;
        if patient.is_none() {
            warn!("Patient not found: {}", id);
        }

        Ok(patient)
    }

    /// Apply the fields present in `input`, leaving the others as stored
    pub async fn update_patient(&self, input: UpdatePatientInput) -> ClinicResult<Patient> {
        info!("Updating patient: {:?}", input);

        input.validate()?;

        let id = input.id;
        let not_found = move || {
            warn!("Patient not found for update: {}", id);
            ClinicError::RecordNotFound {
                entity: "Patient",
                id,
            }
        };

        let mut patient = self.repository.get(id).await?.ok_or_else(not_found)?;

        if let Some(name) = input.name {
            patient.name = name;
        }
        if let Some(date_of_birth) = input.date_of_birth {
            patient.date_of_birth = date_of_birth;
        }
        if let Some(gender) = input.gender {
            patient.gender = gender;
        }
        input.phone.apply_to(&mut patient.phone);
        input.address.apply_to(&mut patient.address);
        patient.updated_at = codec::now();

        let updated = self.repository.update(&patient).await?.ok_or_else(not_found)?;

        info!("Updated patient: {}", updated.id);
        Ok(updated)
    }
}
