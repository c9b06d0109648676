use anyhow::Result;
use chrono::{DateTime, Utc};
use shared::{CreateImmunizationInput, Immunization};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::codec;
use crate::storage::connection::DbConnection;

/// Repository for the `immunizations` table. Immunizations are append-only.
#[derive(Clone)]
pub struct ImmunizationRepository {
    db: DbConnection,
}

impl ImmunizationRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn insert(
        &self,
        input: &CreateImmunizationInput,
        now: DateTime<Utc>,
    ) -> Result<Immunization> {
        let timestamp = codec::encode_timestamp(now);
        let row = sqlx::query(
            r#"
            INSERT INTO immunizations
                (patient_id, vaccine_name, vaccine_type, vaccination_date, next_vaccination_date,
                 batch_number, administered_by, side_effects, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, patient_id, vaccine_name, vaccine_type, vaccination_date, next_vaccination_date,
                      batch_number, administered_by, side_effects, notes, created_at, updated_at
            "#,
        )
        .bind(input.patient_id)
        .bind(&input.vaccine_name)
        .bind(input.vaccine_type.as_str())
        .bind(codec::encode_date(input.vaccination_date))
        .bind(codec::encode_optional_date(input.next_vaccination_date))
        .bind(&input.batch_number)
        .bind(&input.administered_by)
        .bind(&input.side_effects)
        .bind(&input.notes)
        .bind(&timestamp)
        .bind(&timestamp)
        .fetch_one(self.db.pool())
        .await?;

        Self::map_row(&row)
    }

    pub async fn list(&self) -> Result<Vec<Immunization>> {
        let rows = sqlx::query(
            r#"
            SELECT id, patient_id, vaccine_name, vaccine_type, vaccination_date, next_vaccination_date,
                   batch_number, administered_by, side_effects, notes, created_at, updated_at
            FROM immunizations
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    pub async fn list_by_patient(&self, patient_id: i64) -> Result<Vec<Immunization>> {
        let rows = sqlx::query(
            r#"
            SELECT id, patient_id, vaccine_name, vaccine_type, vaccination_date, next_vaccination_date,
                   batch_number, administered_by, side_effects, notes, created_at, updated_at
            FROM immunizations
            WHERE patient_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(patient_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    fn map_row(row: &SqliteRow) -> Result<Immunization> {
        Ok(Immunization {
            id: row.try_get("id")?,
            patient_id: row.try_get("patient_id")?,
            vaccine_name: row.try_get("vaccine_name")?,
            vaccine_type: row.try_get::<String, _>("vaccine_type")?.parse()?,
            vaccination_date: codec::decode_date(row.try_get("vaccination_date")?)?,
            next_vaccination_date: codec::decode_optional_date(
                row.try_get("next_vaccination_date")?,
            )?,
            batch_number: row.try_get("batch_number")?,
            administered_by: row.try_get("administered_by")?,
            side_effects: row.try_get("side_effects")?,
            notes: row.try_get("notes")?,
            created_at: codec::decode_timestamp(row.try_get("created_at")?)?,
            updated_at: codec::decode_timestamp(row.try_get("updated_at")?)?,
        })
    }
}
