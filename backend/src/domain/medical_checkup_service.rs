use shared::{CreateMedicalCheckupInput, MedicalCheckup, UpdateMedicalCheckupInput, Validate};
use tracing::{info, warn};

use crate::domain::error::{ClinicError, ClinicResult};
use crate::storage::{codec, DbConnection, MedicalCheckupRepository};

/// Service for medical checkup logs
#[derive(Clone)]
pub struct MedicalCheckupService {
    repository: MedicalCheckupRepository,
}

impl MedicalCheckupService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            repository: MedicalCheckupRepository::new(db),
        }
    }

    pub async fn create_checkup(
        &self,
        input: CreateMedicalCheckupInput,
    ) -> ClinicResult<MedicalCheckup> {
        info!(
            "Recording checkup: patient_id={}, date={}, type={}",
            input.patient_id, input.checkup_date, input.checkup_type
        );

        input.validate()?;

        let checkup = self
            .repository
            .insert(&input, codec::now())
            .await
            .map_err(|e| ClinicError::from_patient_write(e, input.patient_id))?;

        info!("Recorded checkup {} for patient {}", checkup.id, checkup.patient_id);
        Ok(checkup)
    }

    pub async fn list_checkups(&self) -> ClinicResult<Vec<MedicalCheckup>> {
        info!("Listing all checkups");

        let checkups = self.repository.list().await?;

        info!("Found {} checkups", checkups.len());
        Ok(checkups)
    }

    /// Checkups of one patient, most recent checkup date first
    pub async fn list_checkups_by_patient(
        &self,
        patient_id: i64,
    ) -> ClinicResult<Vec<MedicalCheckup>> {
        info!("Listing checkups for patient {}", patient_id);

        Ok(self.repository.list_by_patient(patient_id).await?)
    }

    /// Apply the fields present in `input`, leaving the others as stored
    pub async fn update_checkup(
        &self,
        input: UpdateMedicalCheckupInput,
    ) -> ClinicResult<MedicalCheckup> {
        info!("Updating checkup: {:?}", input);

        input.validate()?;

        let id = input.id;
        let not_found = move || {
            warn!("Checkup not found for update: {}", id);
            ClinicError::RecordNotFound {
                entity: "Medical checkup",
                id,
            }
        };

        let mut checkup = self.repository.get(id).await?.ok_or_else(not_found)?;

        if let Some(patient_id) = input.patient_id {
            checkup.patient_id = patient_id;
        }
        if let Some(checkup_date) = input.checkup_date {
            checkup.checkup_date = checkup_date;
        }
        if let Some(checkup_type) = input.checkup_type {
            checkup.checkup_type = checkup_type;
        }
        if let Some(doctor_name) = input.doctor_name {
            checkup.doctor_name = doctor_name;
        }
        input.weight.apply_to(&mut checkup.weight);
        input.height.apply_to(&mut checkup.height);
        input.blood_pressure.apply_to(&mut checkup.blood_pressure);
        input.temperature.apply_to(&mut checkup.temperature);
        input.heart_rate.apply_to(&mut checkup.heart_rate);
        input.symptoms.apply_to(&mut checkup.symptoms);
        input.diagnosis.apply_to(&mut checkup.diagnosis);
        input.treatment.apply_to(&mut checkup.treatment);
        input.medication_prescribed.apply_to(&mut checkup.medication_prescribed);
        input.next_checkup_date.apply_to(&mut checkup.next_checkup_date);
        input.notes.apply_to(&mut checkup.notes);
        checkup.updated_at = codec::now();

        let patient_id = checkup.patient_id;
        let updated = self
            .repository
            .update(&checkup)
            .await
            .map_err(|e| ClinicError::from_patient_write(e, patient_id))?
            .ok_or_else(not_found)?;

        info!("Updated checkup: {}", updated.id);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PatientService;
    use chrono::NaiveDate;
    use shared::{CheckupType, CreatePatientInput, FieldUpdate, Gender};
    use std::time::Duration;

    struct TestContext {
        service: MedicalCheckupService,
        patient_id: i64,
        other_patient_id: i64,
    }

    async fn setup_test() -> TestContext {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let patients = PatientService::new(db.clone());
        let mut ids = Vec::new();
        for name in ["Rudi Hartono", "Wati"] {
            let patient = patients
                .create_patient(CreatePatientInput {
                    name: name.to_string(),
                    date_of_birth: NaiveDate::from_ymd_opt(1970, 4, 9).unwrap(),
                    gender: Gender::Male,
                    phone: None,
                    address: None,
                })
                .await
                .unwrap();
            ids.push(patient.id);
        }

        TestContext {
            service: MedicalCheckupService::new(db),
            patient_id: ids[0],
            other_patient_id: ids[1],
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn create_input(patient_id: i64, checkup_date: &str) -> CreateMedicalCheckupInput {
        CreateMedicalCheckupInput {
            patient_id,
            checkup_date: date(checkup_date),
            checkup_type: CheckupType::Adult,
            weight: Some(72.4),
            height: Some(168.0),
            blood_pressure: Some("130/85".to_string()),
            temperature: Some(36.8),
            heart_rate: Some(78),
            symptoms: Some("Headache".to_string()),
            diagnosis: Some("Mild hypertension".to_string()),
            treatment: None,
            medication_prescribed: Some("Amlodipine 5mg".to_string()),
            doctor_name: "Dr. Sari".to_string(),
            next_checkup_date: Some(date("2024-04-01")),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_checkup_coerces_decimals() {
        let ctx = setup_test().await;

        let checkup = ctx
            .service
            .create_checkup(create_input(ctx.patient_id, "2024-03-01"))
            .await
            .unwrap();

        assert_eq!(checkup.weight, Some(72.4));
        assert_eq!(checkup.height, Some(168.0));
        assert_eq!(checkup.temperature, Some(36.8));
        assert_eq!(checkup.heart_rate, Some(78));
        assert_eq!(checkup.next_checkup_date, Some(date("2024-04-01")));
    }

    #[tokio::test]
    async fn test_create_checkup_without_measurements() {
        let ctx = setup_test().await;
        let mut input = create_input(ctx.patient_id, "2024-03-01");
        input.weight = None;
        input.height = None;
        input.temperature = None;
        input.heart_rate = None;

        let checkup = ctx.service.create_checkup(input).await.unwrap();

        assert_eq!(checkup.weight, None);
        assert_eq!(checkup.temperature, None);
        assert_eq!(checkup.heart_rate, None);
    }

    #[tokio::test]
    async fn test_create_checkup_for_unknown_patient() {
        let ctx = setup_test().await;

        let err = ctx
            .service
            .create_checkup(create_input(99999, "2024-03-01"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClinicError::PatientNotFound(99999)));
    }

    #[tokio::test]
    async fn test_list_by_patient_orders_by_date_desc() {
        let ctx = setup_test().await;

        for day in ["2024-02-15", "2024-03-01", "2024-01-30"] {
            ctx.service
                .create_checkup(create_input(ctx.patient_id, day))
                .await
                .unwrap();
        }
        ctx.service
            .create_checkup(create_input(ctx.other_patient_id, "2024-05-05"))
            .await
            .unwrap();

        let dates: Vec<NaiveDate> = ctx
            .service
            .list_checkups_by_patient(ctx.patient_id)
            .await
            .unwrap()
            .iter()
            .map(|c| c.checkup_date)
            .collect();

        assert_eq!(
            dates,
            vec![date("2024-03-01"), date("2024-02-15"), date("2024-01-30")]
        );
        assert_eq!(ctx.service.list_checkups().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_update_partial_fields() {
        let ctx = setup_test().await;
        let created = ctx
            .service
            .create_checkup(create_input(ctx.patient_id, "2024-03-01"))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;

        let mut update = UpdateMedicalCheckupInput::new(created.id);
        update.diagnosis = FieldUpdate::Set("Controlled hypertension".to_string());
        update.weight = FieldUpdate::Set(70.05);
        update.symptoms = FieldUpdate::Clear;

        let updated = ctx.service.update_checkup(update).await.unwrap();

        assert_eq!(updated.diagnosis.as_deref(), Some("Controlled hypertension"));
        assert_eq!(updated.weight, Some(70.05));
        assert_eq!(updated.symptoms, None);
        assert_eq!(updated.height, created.height);
        assert_eq!(updated.doctor_name, created.doctor_name);
        assert_eq!(updated.checkup_date, created.checkup_date);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_update_moves_checkup_between_patients() {
        let ctx = setup_test().await;
        let created = ctx
            .service
            .create_checkup(create_input(ctx.patient_id, "2024-03-01"))
            .await
            .unwrap();

        let mut update = UpdateMedicalCheckupInput::new(created.id);
        update.patient_id = Some(ctx.other_patient_id);
        let moved = ctx.service.update_checkup(update).await.unwrap();
        assert_eq!(moved.patient_id, ctx.other_patient_id);

        let mut update = UpdateMedicalCheckupInput::new(created.id);
        update.patient_id = Some(99999);
        let err = ctx.service.update_checkup(update).await.unwrap_err();
        assert!(matches!(err, ClinicError::PatientNotFound(99999)));
    }

    #[tokio::test]
    async fn test_update_missing_checkup() {
        let ctx = setup_test().await;

        let err = ctx
            .service
            .update_checkup(UpdateMedicalCheckupInput::new(999999))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Medical checkup with id 999999 not found");
    }
}
