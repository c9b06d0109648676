use anyhow::Result;
use chrono::{DateTime, Utc};
use shared::{CreateDeliveryServiceInput, DeliveryService};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::codec::{self, WEIGHT_SCALE};
use crate::storage::connection::DbConnection;

/// Repository for the `delivery_services` table. Deliveries are append-only.
#[derive(Clone)]
pub struct DeliveryServiceRepository {
    db: DbConnection,
}

impl DeliveryServiceRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn insert(
        &self,
        input: &CreateDeliveryServiceInput,
        now: DateTime<Utc>,
    ) -> Result<DeliveryService> {
        let timestamp = codec::encode_timestamp(now);
        let row = sqlx::query(
            r#"
            INSERT INTO delivery_services
                (patient_id, delivery_date, delivery_type, baby_weight, baby_gender, baby_name,
                 complications, doctor_name, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, patient_id, delivery_date, delivery_type, baby_weight, baby_gender, baby_name,
                      complications, doctor_name, notes, created_at, updated_at
            "#,
        )
        .bind(input.patient_id)
        .bind(codec::encode_date(input.delivery_date))
        .bind(input.delivery_type.as_str())
        .bind(codec::encode_decimal(input.baby_weight, WEIGHT_SCALE))
        .bind(input.baby_gender.as_str())
        .bind(&input.baby_name)
        .bind(&input.complications)
        .bind(&input.doctor_name)
        .bind(&input.notes)
        .bind(&timestamp)
        .bind(&timestamp)
        .fetch_one(self.db.pool())
        .await?;

        Self::map_row(&row)
    }

    pub async fn list(&self) -> Result<Vec<DeliveryService>> {
        let rows = sqlx::query(
            r#"
            SELECT id, patient_id, delivery_date, delivery_type, baby_weight, baby_gender, baby_name,
                   complications, doctor_name, notes, created_at, updated_at
            FROM delivery_services
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    pub async fn list_by_patient(&self, patient_id: i64) -> Result<Vec<DeliveryService>> {
        let rows = sqlx::query(
            r#"
            SELECT id, patient_id, delivery_date, delivery_type, baby_weight, baby_gender, baby_name,
                   complications, doctor_name, notes, created_at, updated_at
            FROM delivery_services
            WHERE patient_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(patient_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    fn map_row(row: &SqliteRow) -> Result<DeliveryService> {
        Ok(DeliveryService {
            id: row.try_get("id")?,
            patient_id: row.try_get("patient_id")?,
            delivery_date: codec::decode_date(row.try_get("delivery_date")?)?,
            delivery_type: row.try_get::<String, _>("delivery_type")?.parse()?,
            baby_weight: codec::decode_decimal(row.try_get("baby_weight")?)?,
            baby_gender: row.try_get::<String, _>("baby_gender")?.parse()?,
            baby_name: row.try_get("baby_name")?,
            complications: row.try_get("complications")?,
            doctor_name: row.try_get("doctor_name")?,
            notes: row.try_get("notes")?,
            created_at: codec::decode_timestamp(row.try_get("created_at")?)?,
            updated_at: codec::decode_timestamp(row.try_get("updated_at")?)?,
        })
    }
}
