//! Route handlers for the `/blueprints` collection.
//!
//! Reads go through the configured filter; writes store exactly what was sent.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use blueprints_core::{validate_update, Blueprint};
use blueprints_store::BlueprintFilter;

use crate::errors::ApiError;
use crate::server::AppState;

type ApiResult<T> = Result<T, ApiError>;

pub async fn list_all(State(state): State<AppState>) -> ApiResult<Json<Vec<Blueprint>>> {
    let blueprints = state.source.fetch_all().await?;
    Ok(Json(state.filter.filter_all(blueprints)))
}

pub async fn list_by_author(
    State(state): State<AppState>,
    Path(author): Path<String>,
) -> ApiResult<Json<Vec<Blueprint>>> {
    let blueprints = state.source.fetch_by_author(&author).await?;
    Ok(Json(state.filter.filter_all(blueprints)))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path((author, name)): Path<(String, String)>,
) -> ApiResult<Json<Blueprint>> {
    let blueprint = state.source.fetch_by_author_and_name(&author, &name).await?;
    Ok(Json(state.filter.filter(blueprint)))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Blueprint>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Blueprint>)> {
    let Json(blueprint) = body?;
    let stored = state.source.create(blueprint).await?;
    info!(key = %stored.key(), points = stored.point_count(), "blueprint created");
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn update(
    State(state): State<AppState>,
    Path((author, name)): Path<(String, String)>,
    body: Result<Json<Blueprint>, JsonRejection>,
) -> ApiResult<Json<Blueprint>> {
    let Json(blueprint) = body?;
    validate_update(&author, &name, &blueprint)?;
    let stored = state.source.update(&author, &name, blueprint).await?;
    info!(key = %stored.key(), points = stored.point_count(), "blueprint updated");
    Ok(Json(stored))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
