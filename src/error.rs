use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::views::{self, Notice, PageContext};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Zip code must be exactly 5 digits")]
    InvalidZip,
    #[error("Capacity must be a whole number between 1 and 100")]
    CapacityOutOfRange,
    #[error("Unknown time slot '{0}'")]
    UnknownTimeSlot(String),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("{0}")]
    Database(#[from] sqlx::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("access key contains characters not allowed in a header")]
    InvalidCredential,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("template failed to parse: {0}")]
    Template(String),
    #[error("template failed to render: {0}")]
    Render(#[from] handlebars::RenderError),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Database error: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("Page rendering failed: {0}")]
    View(#[from] ViewError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Persistence(e) => {
                tracing::error!(error = %e, "store call failed");
                StatusCode::BAD_GATEWAY
            }
            AppError::View(e) => {
                tracing::error!(error = %e, "page rendering failed");
                return (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response();
            }
        };
        let page = PageContext::default().with_notice(Notice::error(self.to_string()));
        match views::render_page(&page) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "error page rendering failed");
                (status, self.to_string()).into_response()
            }
        }
    }
}
