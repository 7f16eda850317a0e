use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info};

use super::{ListingStore, TABLE};
use crate::error::PersistenceError;
use crate::models::{ClassListing, NewListing, ZipCode};

/// Client for the hosted store's PostgREST endpoint.
#[derive(Clone, Debug)]
pub struct RestStore {
    client: Client,
    table_url: String,
}

impl RestStore {
    pub fn new(endpoint: &str, key: &str, timeout: Duration) -> Result<Self, PersistenceError> {
        let mut headers = HeaderMap::new();
        let mut api_key =
            HeaderValue::from_str(key).map_err(|_| PersistenceError::InvalidCredential)?;
        api_key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|_| PersistenceError::InvalidCredential)?;
        bearer.set_sensitive(true);
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .user_agent(concat!("classfinder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            table_url: format!("{}/rest/v1/{TABLE}", endpoint.trim_end_matches('/')),
        })
    }
}

async fn ensure_success(response: Response) -> Result<Response, PersistenceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(PersistenceError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode_rows(response: Response) -> Result<Vec<ClassListing>, PersistenceError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| PersistenceError::Decode(e.to_string()))
}

#[async_trait]
impl ListingStore for RestStore {
    async fn insert(&self, listing: &NewListing) -> Result<i64, PersistenceError> {
        let response = self
            .client
            .post(&self.table_url)
            .header("Prefer", "return=representation")
            .json(listing)
            .send()
            .await?;
        let rows = decode_rows(ensure_success(response).await?).await?;
        let id = rows
            .first()
            .map(|row| row.id)
            .ok_or_else(|| PersistenceError::Decode("insert returned no rows".to_string()))?;
        info!(id, zip = %listing.zip_code, "listing inserted");
        Ok(id)
    }

    async fn find_by_zip(&self, zip: &ZipCode) -> Result<Vec<ClassListing>, PersistenceError> {
        debug!(zip = %zip, "searching listings");
        let filter = format!("eq.{zip}");
        let response = self
            .client
            .get(&self.table_url)
            .query(&[
                ("select", "*"),
                ("zip_code", filter.as_str()),
                ("order", "created_at.desc"),
            ])
            .send()
            .await?;
        decode_rows(ensure_success(response).await?).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), PersistenceError> {
        let response = self
            .client
            .delete(&self.table_url)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        ensure_success(response).await?;
        info!(id, "listing deleted");
        Ok(())
    }
}
