//! Persistence client for the `fitness_classes` table.
//!
//! Every backend exposes the same three calls. Each call is a single attempt;
//! callers render whatever error comes back.

mod memory;
mod rest;
mod sqlite;

pub use memory::MemoryStore;
pub use rest::RestStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::error::PersistenceError;
use crate::models::{ClassListing, NewListing, ZipCode};

pub const TABLE: &str = "fitness_classes";

#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Stores a listing and returns the id the store assigned to it.
    async fn insert(&self, listing: &NewListing) -> Result<i64, PersistenceError>;

    /// Listings whose zip code equals `zip`, newest first. No match is an empty vec.
    async fn find_by_zip(&self, zip: &ZipCode) -> Result<Vec<ClassListing>, PersistenceError>;

    /// Removes a listing. Unknown ids are not an error.
    async fn delete_by_id(&self, id: i64) -> Result<(), PersistenceError>;
}
