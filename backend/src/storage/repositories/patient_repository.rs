use anyhow::Result;
use chrono::{DateTime, Utc};
use shared::{CreatePatientInput, Patient};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::codec;
use crate::storage::connection::DbConnection;

/// Repository for the `patients` table
#[derive(Clone)]
pub struct PatientRepository {
    db: DbConnection,
}

impl PatientRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a patient and return the stored row
    pub async fn insert(&self, input: &CreatePatientInput, now: DateTime<Utc>) -> Result<Patient> {
        let timestamp = codec::encode_timestamp(now);
        let row = sqlx::query(
            r#"
            INSERT INTO patients (name, date_of_birth, gender, phone, address, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, name, date_of_birth, gender, phone, address, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(codec::encode_date(input.date_of_birth))
        .bind(input.gender.as_str())
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&timestamp)
        .bind(&timestamp)
        .fetch_one(self.db.pool())
        .await?;

        Self::map_row(&row)
    }

    /// Get a patient by ID
    pub async fn get(&self, id: i64) -> Result<Option<Patient>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, date_of_birth, gender, phone, address, created_at, updated_at
            FROM patients
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    /// List all patients in insertion order
    pub async fn list(&self) -> Result<Vec<Patient>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, date_of_birth, gender, phone, address, created_at, updated_at
            FROM patients
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Write every mutable column of `patient` back; `None` when the row is gone
    pub async fn update(&self, patient: &Patient) -> Result<Option<Patient>> {
        let row = sqlx::query(
            r#"
            UPDATE patients
            SET name = ?, date_of_birth = ?, gender = ?, phone = ?, address = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, name, date_of_birth, gender, phone, address, created_at, updated_at
            "#,
        )
        .bind(&patient.name)
        .bind(codec::encode_date(patient.date_of_birth))
        .bind(patient.gender.as_str())
        .bind(&patient.phone)
        .bind(&patient.address)
        .bind(codec::encode_timestamp(patient.updated_at))
        .bind(patient.id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    fn map_row(row: &SqliteRow) -> Result<Patient> {
        Ok(Patient {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            date_of_birth: codec::decode_date(row.try_get("date_of_birth")?)?,
            gender: row.try_get::<String, _>("gender")?.parse()?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
            created_at: codec::decode_timestamp(row.try_get("created_at")?)?,
            updated_at: codec::decode_timestamp(row.try_get("updated_at")?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::Gender;

    async fn setup_test() -> PatientRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        PatientRepository::new(db)
    }

    fn input(name: &str) -> CreatePatientInput {
        CreatePatientInput {
            name: name.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            gender: Gender::Female,
            phone: Some("081234567890".to_string()),
            address: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = setup_test().await;
        let now = codec::now();

        let stored = repo.insert(&input("Siti Rahma"), now).await.unwrap();
        assert!(stored.id > 0);
        assert_eq!(stored.created_at, now);

        let fetched = repo.get(stored.id).await.unwrap();
        assert_eq!(fetched.as_ref(), Some(&stored));
        assert!(repo.get(stored.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let repo = setup_test().await;
        assert!(repo.list().await.unwrap().is_empty());

        repo.insert(&input("Zahra"), codec::now()).await.unwrap();
        repo.insert(&input("Ayu"), codec::now()).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Zahra", "Ayu"]);
    }

    #[tokio::test]
    async fn test_update_missing_row() {
        let repo = setup_test().await;
        let mut patient = repo.insert(&input("Siti"), codec::now()).await.unwrap();
        patient.id = 999_999;

        assert!(repo.update(&patient).await.unwrap().is_none());
    }
}
