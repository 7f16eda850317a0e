use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, PoisonError};

use super::ListingStore;
use crate::error::PersistenceError;
use crate::models::{ClassListing, NewListing, ZipCode};

#[derive(Default)]
struct Rows {
    next_id: i64,
    listings: Vec<ClassListing>,
}

/// Process-local store. Contents vanish with the process.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Rows>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner).listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn insert(&self, listing: &NewListing) -> Result<i64, PersistenceError> {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        rows.next_id += 1;
        let id = rows.next_id;
        rows.listings.push(ClassListing {
            id,
            class_name: listing.class_name.clone(),
            zip_code: listing.zip_code.to_string(),
            instructor: listing.instructor.clone(),
            time_slot: listing.time_slot,
            description: listing.description.clone(),
            capacity: listing.capacity,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn find_by_zip(&self, zip: &ZipCode) -> Result<Vec<ClassListing>, PersistenceError> {
        let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(rows
            .listings
            .iter()
            .rev()
            .filter(|l| l.zip_code == zip.as_str())
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), PersistenceError> {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        rows.listings.retain(|l| l.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSlot;

    fn listing(name: &str, zip: &str) -> NewListing {
        NewListing {
            class_name: name.to_string(),
            zip_code: ZipCode::parse(zip).unwrap(),
            instructor: "Sam".to_string(),
            time_slot: TimeSlot::Evening,
            description: None,
            capacity: 12,
        }
    }

    #[tokio::test]
    async fn finds_only_matching_zip_newest_first() {
        let store = MemoryStore::new();
        let first = store.insert(&listing("Spin", "10001")).await.unwrap();
        store.insert(&listing("Pilates", "94110")).await.unwrap();
        let third = store.insert(&listing("Boxing", "10001")).await.unwrap();
        assert_ne!(first, third);

        let zip = ZipCode::parse("10001").unwrap();
        let found = store.find_by_zip(&zip).await.unwrap();
        let ids: Vec<i64> = found.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![third, first]);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::new();
        let id = store.insert(&listing("Spin", "10001")).await.unwrap();
        store.delete_by_id(id).await.unwrap();
        store.delete_by_id(id).await.unwrap();
        store.delete_by_id(999).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn unknown_zip_is_empty() {
        let store = MemoryStore::new();
        let zip = ZipCode::parse("00000").unwrap();
        assert!(store.find_by_zip(&zip).await.unwrap().is_empty());
    }
}
