use shared::{CreateImmunizationInput, Immunization, Validate};
use tracing::info;

use crate::domain::error::{ClinicError, ClinicResult};
use crate::storage::{codec, DbConnection, ImmunizationRepository};

/// Tracks vaccinations given to patients
#[derive(Clone)]
pub struct ImmunizationService {
    repository: ImmunizationRepository,
}

impl ImmunizationService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            repository: ImmunizationRepository::new(db),
        }
    }

    pub async fn create_immunization(
        &self,
        input: CreateImmunizationInput,
    ) -> ClinicResult<Immunization> {
        info!(
            "Recording immunization: patient_id={}, vaccine={}, type={}",
            input.patient_id, input.vaccine_name, input.vaccine_type
        );

        input.validate()?;

        let immunization = self
            .repository
            .insert(&input, codec::now())
            .await
            .map_err(|e| ClinicError::from_patient_write(e, input.patient_id))?;

        info!(
            "Recorded immunization {} for patient {}",
            immunization.id, immunization.patient_id
        );
        Ok(immunization)
    }

    pub async fn list_immunizations(&self) -> ClinicResult<Vec<Immunization>> {
        info!("Listing all immunizations");

        let immunizations = self.repository.list().await?;

        info!("Found {} immunizations", immunizations.len());
        Ok(immunizations)
    }

    pub async fn list_immunizations_by_patient(
        &self,
        patient_id: i64,
    ) -> ClinicResult<Vec<Immunization>> {
        info!("Listing immunizations for patient {}", patient_id);

        Ok(self.repository.list_by_patient(patient_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PatientService;
    use chrono::NaiveDate;
    use shared::{CreatePatientInput, Gender, VaccineType};

    async fn setup_test() -> (ImmunizationService, i64) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let patient = PatientService::new(db.clone())
            .create_patient(CreatePatientInput {
                name: "Bayu".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(2023, 11, 2).unwrap(),
                gender: Gender::Male,
                phone: None,
                address: None,
            })
            .await
            .unwrap();
        (ImmunizationService::new(db), patient.id)
    }

    fn create_input(patient_id: i64) -> CreateImmunizationInput {
        CreateImmunizationInput {
            patient_id,
            vaccine_name: "Hepatitis B".to_string(),
            vaccine_type: VaccineType::Basic,
            vaccination_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            next_vaccination_date: NaiveDate::from_ymd_opt(2024, 2, 2),
            batch_number: Some("HB-2291".to_string()),
            administered_by: "Bidan Ani".to_string(),
            side_effects: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_immunization() {
        let (service, patient_id) = setup_test().await;

        let immunization = service.create_immunization(create_input(patient_id)).await.unwrap();

        assert!(immunization.id > 0);
        assert_eq!(immunization.vaccine_name, "Hepatitis B");
        assert_eq!(immunization.vaccine_type, VaccineType::Basic);
        assert_eq!(
            immunization.next_vaccination_date,
            NaiveDate::from_ymd_opt(2024, 2, 2)
        );
        assert_eq!(immunization.batch_number.as_deref(), Some("HB-2291"));
        assert_eq!(immunization.created_at, immunization.updated_at);
    }

    #[tokio::test]
    async fn test_create_immunization_for_unknown_patient() {
        let (service, _) = setup_test().await;

        let err = service.create_immunization(create_input(424242)).await.unwrap_err();

        assert_eq!(err.to_string(), "Patient with id 424242 not found");
    }

    #[tokio::test]
    async fn test_list_by_patient_in_insertion_order() {
        let (service, patient_id) = setup_test().await;

        let first = service.create_immunization(create_input(patient_id)).await.unwrap();
        let mut booster = create_input(patient_id);
        booster.vaccine_name = "DPT".to_string();
        booster.vaccine_type = VaccineType::Booster;
        let second = service.create_immunization(booster).await.unwrap();

        let ids: Vec<i64> = service
            .list_immunizations_by_patient(patient_id)
            .await
            .unwrap()
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }
}
