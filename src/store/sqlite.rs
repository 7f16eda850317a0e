use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

use super::ListingStore;
use crate::error::PersistenceError;
use crate::models::{ClassListing, NewListing, TimeSlot, ZipCode};

/// Local SQLite backend with the same table layout as the hosted store.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct ListingRow {
    id: i64,
    class_name: String,
    zip_code: String,
    instructor: String,
    time_slot: String,
    description: Option<String>,
    capacity: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<ListingRow> for ClassListing {
    type Error = PersistenceError;

    fn try_from(row: ListingRow) -> Result<Self, Self::Error> {
        let time_slot = TimeSlot::from_str(&row.time_slot)
            .map_err(|e| PersistenceError::Decode(e.to_string()))?;
        let capacity = i32::try_from(row.capacity)
            .map_err(|_| PersistenceError::Decode(format!("capacity {} out of range", row.capacity)))?;
        Ok(ClassListing {
            id: row.id,
            class_name: row.class_name,
            zip_code: row.zip_code,
            instructor: row.instructor,
            time_slot,
            description: row.description,
            capacity,
            created_at: row.created_at,
        })
    }
}

impl SqliteStore {
    pub async fn connect(url: &str) -> Result<Self, PersistenceError> {
        let connect_options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, PersistenceError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS fitness_classes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                class_name TEXT NOT NULL,
                zip_code TEXT NOT NULL,
                instructor TEXT NOT NULL,
                time_slot TEXT NOT NULL,
                description TEXT,
                capacity INTEGER NOT NULL,
                created_at TIMESTAMP NOT NULL
            );",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_fitness_classes_zip_code ON fitness_classes (zip_code);",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl ListingStore for SqliteStore {
    async fn insert(&self, listing: &NewListing) -> Result<i64, PersistenceError> {
        let id = sqlx::query(
            "INSERT INTO fitness_classes (class_name, zip_code, instructor, time_slot, description, capacity, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&listing.class_name)
        .bind(listing.zip_code.as_str())
        .bind(&listing.instructor)
        .bind(listing.time_slot.label())
        .bind(&listing.description)
        .bind(listing.capacity)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();
        info!(id, zip = %listing.zip_code, "listing inserted");
        Ok(id)
    }

    async fn find_by_zip(&self, zip: &ZipCode) -> Result<Vec<ClassListing>, PersistenceError> {
        debug!(zip = %zip, "searching listings");
        let rows: Vec<ListingRow> = sqlx::query_as(
            "SELECT * FROM fitness_classes WHERE zip_code = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(zip.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(ClassListing::try_from).collect()
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), PersistenceError> {
        sqlx::query("DELETE FROM fitness_classes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        info!(id, "listing deleted");
        Ok(())
    }
}
