use crate::{
    error::AppError,
    models::ZipCode,
    schema,
    state::AppState,
    validation::{self, ListingForm},
    views::{self, Notice, PageContext},
};
use axum::{
    Form,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect},
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    zip: Option<String>,
    deleted: Option<i64>,
}

pub async fn index(
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, AppError> {
    let mut page = PageContext::default();
    if let Some(id) = params.deleted {
        page = page.with_notice(Notice::success(format!("Class #{id} deleted.")));
    }
    if let Some(raw) = params.zip.as_deref() {
        let zip = ZipCode::parse(raw)?;
        let listings = app_state.store.find_by_zip(&zip).await?;
        page = page.with_results(zip.as_str(), listings);
    }

    Ok(Html(views::render_page(&page)?))
}

pub async fn create_listing(
    State(app_state): State<AppState>,
    Form(form): Form<ListingForm>,
) -> Result<(StatusCode, Html<String>), AppError> {
    let listing = validation::validate_listing(&form)?;
    app_state.store.insert(&listing).await?;

    let page = PageContext::default().with_notice(Notice::success(format!(
        "Class '{}' added successfully!",
        listing.class_name
    )));
    Ok((StatusCode::CREATED, Html(views::render_page(&page)?)))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeletePayload {
    zip: String,
}

pub async fn delete_listing(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Form(payload): Form<DeletePayload>,
) -> Result<Redirect, AppError> {
    app_state.store.delete_by_id(id).await?;
    let target = match ZipCode::parse(&payload.zip) {
        Ok(zip) => format!("/?zip={zip}&deleted={id}"),
        Err(_) => "/".to_string(),
    };
    Ok(Redirect::to(&target))
}

pub async fn setup_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        schema::SETUP_SCRIPT,
    )
}
