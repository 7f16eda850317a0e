pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod schema;
pub mod state;
pub mod store;
pub mod validation;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use config::Backend;
use error::PersistenceError;
use state::AppState;
use store::{MemoryStore, RestStore, SqliteStore};

pub fn app(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/classes", post(handlers::create_listing))
        .route("/classes/{id}/delete", post(handlers::delete_listing))
        .route("/setup.sql", get(handlers::setup_script))
        .nest_service("/assets", ServeDir::new("assets"))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}

/// Builds the store handle the whole process shares.
pub async fn connect_store(backend: &Backend) -> Result<AppState, PersistenceError> {
    let app_state = match backend {
        Backend::Rest { url, key, timeout } => AppState::new(RestStore::new(url, key, *timeout)?),
        Backend::Sqlite { url } => AppState::new(SqliteStore::connect(url).await?),
        Backend::Memory => AppState::new(MemoryStore::new()),
    };
    Ok(app_state)
}
