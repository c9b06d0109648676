use anyhow::Result;
use chrono::{DateTime, Utc};
use shared::{CreateMedicalCheckupInput, MedicalCheckup};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::codec::{self, TEMPERATURE_SCALE, WEIGHT_SCALE};
use crate::storage::connection::DbConnection;

/// Repository for the `medical_checkups` table
#[derive(Clone)]
pub struct MedicalCheckupRepository {
    db: DbConnection,
}

impl MedicalCheckupRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn insert(
        &self,
        input: &CreateMedicalCheckupInput,
        now: DateTime<Utc>,
    ) -> Result<MedicalCheckup> {
        let timestamp = codec::encode_timestamp(now);
        let row = sqlx::query(
            r#"
            INSERT INTO medical_checkups
                (patient_id, checkup_date, checkup_type, weight, height, blood_pressure, temperature,
                 heart_rate, symptoms, diagnosis, treatment, medication_prescribed, doctor_name,
                 next_checkup_date, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, patient_id, checkup_date, checkup_type, weight, height, blood_pressure,
                      temperature, heart_rate, symptoms, diagnosis, treatment, medication_prescribed,
                      doctor_name, next_checkup_date, notes, created_at, updated_at
            "#,
        )
        .bind(input.patient_id)
        .bind(codec::encode_date(input.checkup_date))
        .bind(input.checkup_type.as_str())
        .bind(codec::encode_optional_decimal(input.weight, WEIGHT_SCALE))
        .bind(codec::encode_optional_decimal(input.height, WEIGHT_SCALE))
        .bind(&input.blood_pressure)
        .bind(codec::encode_optional_decimal(input.temperature, TEMPERATURE_SCALE))
        .bind(input.heart_rate)
        .bind(&input.symptoms)
        .bind(&input.diagnosis)
        .bind(&input.treatment)
        .bind(&input.medication_prescribed)
        .bind(&input.doctor_name)
        .bind(codec::encode_optional_date(input.next_checkup_date))
        .bind(&input.notes)
        .bind(&timestamp)
        .bind(&timestamp)
        .fetch_one(self.db.pool())
        .await?;

        Self::map_row(&row)
    }

    pub async fn get(&self, id: i64) -> Result<Option<MedicalCheckup>> {
        let row = sqlx::query(
            r#"
            SELECT id, patient_id, checkup_date, checkup_type, weight, height, blood_pressure,
                   temperature, heart_rate, symptoms, diagnosis, treatment, medication_prescribed,
                   doctor_name, next_checkup_date, notes, created_at, updated_at
            FROM medical_checkups
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    pub async fn list(&self) -> Result<Vec<MedicalCheckup>> {
        let rows = sqlx::query(
            r#"
            SELECT id, patient_id, checkup_date, checkup_type, weight, height, blood_pressure,
                   temperature, heart_rate, symptoms, diagnosis, treatment, medication_prescribed,
                   doctor_name, next_checkup_date, notes, created_at, updated_at
            FROM medical_checkups
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Checkups of one patient, most recent checkup date first
    pub async fn list_by_patient(&self, patient_id: i64) -> Result<Vec<MedicalCheckup>> {
        let rows = sqlx::query(
            r#"
            SELECT id, patient_id, checkup_date, checkup_type, weight, height, blood_pressure,
                   temperature, heart_rate, symptoms, diagnosis, treatment, medication_prescribed,
                   doctor_name, next_checkup_date, notes, created_at, updated_at
            FROM medical_checkups
            WHERE patient_id = ?
            ORDER BY checkup_date DESC, id DESC
            "#,
        )
        .bind(patient_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Write every mutable column of `checkup` back; `None` when the row is gone
    pub async fn update(&self, checkup: &MedicalCheckup) -> Result<Option<MedicalCheckup>> {
        let row = sqlx::query(
            r#"
            UPDATE medical_checkups
            SET patient_id = ?, checkup_date = ?, checkup_type = ?, weight = ?, height = ?,
                blood_pressure = ?, temperature = ?, heart_rate = ?, symptoms = ?, diagnosis = ?,
                treatment = ?, medication_prescribed = ?, doctor_name = ?, next_checkup_date = ?,
                notes = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, patient_id, checkup_date, checkup_type, weight, height, blood_pressure,
                      temperature, heart_rate, symptoms, diagnosis, treatment, medication_prescribed,
                      doctor_name, next_checkup_date, notes, created_at, updated_at
            "#,
        )
        .bind(checkup.patient_id)
        .bind(codec::encode_date(checkup.checkup_date))
        .bind(checkup.checkup_type.as_str())
        .bind(codec::encode_optional_decimal(checkup.weight, WEIGHT_SCALE))
        .bind(codec::encode_optional_decimal(checkup.height, WEIGHT_SCALE))
        .bind(&checkup.blood_pressure)
        .bind(codec::encode_optional_decimal(checkup.temperature, TEMPERATURE_SCALE))
        .bind(checkup.heart_rate)
        .bind(&checkup.symptoms)
        .bind(&checkup.diagnosis)
        .bind(&checkup.treatment)
        .bind(&checkup.medication_prescribed)
        .bind(&checkup.doctor_name)
        .bind(codec::encode_optional_date(checkup.next_checkup_date))
        .bind(&checkup.notes)
        .bind(codec::encode_timestamp(checkup.updated_at))
        .bind(checkup.id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    fn map_row(row: &SqliteRow) -> Result<MedicalCheckup> {
        Ok(MedicalCheckup {
            id: row.try_get("id")?,
            patient_id: row.try_get("patient_id")?,
            checkup_date: codec::decode_date(row.try_get("checkup_date")?)?,
            checkup_type: row.try_get::<String, _>("checkup_type")?.parse()?,
            weight: codec::decode_optional_decimal(row.try_get("weight")?)?,
            height: codec::decode_optional_decimal(row.try_get("height")?)?,
            blood_pressure: row.try_get("blood_pressure")?,
            temperature: codec::decode_optional_decimal(row.try_get("temperature")?)?,
            heart_rate: row.try_get("heart_rate")?,
            symptoms: row.try_get("symptoms")?,
            diagnosis: row.try_get("diagnosis")?,
            treatment: row.try_get("treatment")?,
            medication_prescribed: row.try_get("medication_prescribed")?,
            doctor_name: row.try_get("doctor_name")?,
            next_checkup_date: codec::decode_optional_date(row.try_get("next_checkup_date")?)?,
            notes: row.try_get("notes")?,
            created_at: codec::decode_timestamp(row.try_get("created_at")?)?,
            updated_at: codec::decode_timestamp(row.try_get("updated_at")?)?,
        })
    }
}
