use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// DbConnection owns the pool shared by every repository
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if needed) the database at `url` and make sure the schema exists
    pub async fn new(url: &str) -> Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating database {}", url);
            Sqlite::create_database(url)
                .await
                .with_context(|| format!("Failed to create database {}", url))?;
        }

        // Patient references are enforced by the schema, so the pragma must be on
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database url {}", url))?
            .foreign_keys(true);

        // Every connection to a private in-memory database sees its own empty
        // database, so such pools hold exactly one connection for their lifetime
        let pool_options = if is_private_memory(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS patients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                date_of_birth TEXT NOT NULL,
                gender TEXT NOT NULL CHECK (gender IN ('male', 'female')),
                phone TEXT,
                address TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS delivery_services (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                patient_id INTEGER NOT NULL,
                delivery_date TEXT NOT NULL,
                delivery_type TEXT NOT NULL CHECK (delivery_type IN ('normal', 'caesarean', 'assisted')),
                baby_weight TEXT NOT NULL,
                baby_gender TEXT NOT NULL CHECK (baby_gender IN ('male', 'female')),
                baby_name TEXT,
                complications TEXT,
                doctor_name TEXT NOT NULL,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (patient_id) REFERENCES patients (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS immunizations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                patient_id INTEGER NOT NULL,
                vaccine_name TEXT NOT NULL,
                vaccine_type TEXT NOT NULL CHECK (vaccine_type IN ('basic', 'additional', 'booster')),
                vaccination_date TEXT NOT NULL,
                next_vaccination_date TEXT,
                batch_number TEXT,
                administered_by TEXT NOT NULL,
                side_effects TEXT,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (patient_id) REFERENCES patients (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS medical_checkups (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                patient_id INTEGER NOT NULL,
                checkup_date TEXT NOT NULL,
                checkup_type TEXT NOT NULL CHECK (checkup_type IN ('routine', 'pregnancy', 'child', 'adult', 'elderly')),
                weight TEXT,
                height TEXT,
                blood_pressure TEXT,
                temperature TEXT,
                heart_rate INTEGER,
                symptoms TEXT,
                diagnosis TEXT,
                treatment TEXT,
                medication_prescribed TEXT,
                doctor_name TEXT NOT NULL,
                next_checkup_date TEXT,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (patient_id) REFERENCES patients (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        for statement in [
            "CREATE INDEX IF NOT EXISTS idx_delivery_services_patient ON delivery_services(patient_id);",
            "CREATE INDEX IF NOT EXISTS idx_immunizations_patient ON immunizations(patient_id);",
            "CREATE INDEX IF NOT EXISTS idx_medical_checkups_patient ON medical_checkups(patient_id);",
            "CREATE INDEX IF NOT EXISTS idx_medical_checkups_date ON medical_checkups(checkup_date DESC);",
        ] {
            sqlx::query(statement).execute(pool).await?;
        }

        Ok(())
    }
}

/// True for in-memory urls whose connections do not share one database
fn is_private_memory(url: &str) -> bool {
    let in_memory = url.contains(":memory:") || url.contains("mode=memory");
    in_memory && !url.contains("cache=shared")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[tokio::test]
    async fn test_schema_creates_all_tables() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");

        let rows = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(db.pool())
            .await
            .unwrap();
        let tables: Vec<String> = rows.iter().map(|r| r.get("name")).collect();

        for table in ["delivery_services", "immunizations", "medical_checkups", "patients"] {
            assert!(tables.contains(&table.to_string()), "missing table {}", table);
        }
    }

    #[tokio::test]
    async fn test_enum_columns_are_checked() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");

        let result = sqlx::query(
            r#"
            INSERT INTO patients (name, date_of_birth, gender, created_at, updated_at)
            VALUES ('X', '2000-01-01', 'unknown', '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')
            "#,
        )
        .execute(db.pool())
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");

        let result = sqlx::query(
            r#"
            INSERT INTO immunizations
                (patient_id, vaccine_name, vaccine_type, vaccination_date, administered_by, created_at, updated_at)
            VALUES (42, 'BCG', 'basic', '2024-01-01', 'Bidan Ani', '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')
            "#,
        )
        .execute(db.pool())
        .await;

        let err = result.unwrap_err();
        let db_err = err.as_database_error().expect("expected a database error");
        assert!(db_err.message().contains("FOREIGN KEY"));
    }

    #[test]
    fn test_private_memory_urls() {
        assert!(is_private_memory("sqlite::memory:"));
        assert!(is_private_memory("sqlite://:memory:"));
        assert!(is_private_memory("file:scratch?mode=memory"));
        assert!(!is_private_memory("file:memdb_1?mode=memory&cache=shared"));
        assert!(!is_private_memory("sqlite:clinic.db"));
    }

    #[tokio::test]
    async fn test_memory_database_keeps_schema_across_queries() {
        let db = DbConnection::new("sqlite::memory:").await.expect("Failed to open memory database");
        assert_eq!(db.pool().options().get_max_connections(), 1);

        sqlx::query(
            r#"
            INSERT INTO patients (name, date_of_birth, gender, created_at, updated_at)
            VALUES ('Siti', '1990-05-01', 'female', '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')
            "#,
        )
        .execute(db.pool())
        .await
        .unwrap();

        let count_patients = || async {
            sqlx::query("SELECT COUNT(*) AS n FROM patients")
                .fetch_one(db.pool())
                .await
                .map(|row| row.get::<i64, _>("n"))
        };
        let (a, b, c) = tokio::join!(count_patients(), count_patients(), count_patients());
        assert_eq!(a.unwrap(), 1);
        assert_eq!(b.unwrap(), 1);
        assert_eq!(c.unwrap(), 1);
    }
}
