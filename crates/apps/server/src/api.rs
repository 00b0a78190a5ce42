use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog::Dataset;
use dashboard::{controls, render, Controls, FilterSelection, ViewModel};
use formats::LoadError;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::AppState;

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

fn load_error(err: &LoadError) -> ApiError {
    if err.is_not_found() {
        warn!("dataset unavailable: {err}");
        api_error(StatusCode::SERVICE_UNAVAILABLE, err.to_string())
    } else {
        error!("dataset load failed: {err}");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

/// Parsing touches the filesystem, keep it off the async workers.
async fn current_dataset(state: &AppState) -> Result<Arc<Dataset>, ApiError> {
    let catalog = Arc::clone(&state.catalog);
    let joined = tokio::task::spawn_blocking(move || catalog.dataset()).await;
    match joined {
        Ok(Ok(dataset)) => Ok(dataset),
        Ok(Err(err)) => Err(load_error(&err)),
        Err(err) => {
            error!("dataset load task failed: {err}");
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "dataset load task failed",
            ))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ControlsResponse {
    pub dataset_version: String,
    pub controls: Controls,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub dataset_version: String,
    pub view: ViewModel,
}

pub async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

pub async fn get_controls(State(state): State<AppState>) -> Result<Json<ControlsResponse>, ApiError> {
    let dataset = current_dataset(&state).await?;
    Ok(Json(ControlsResponse {
        dataset_version: dataset.version.clone(),
        controls: controls(&dataset.table, &state.settings),
    }))
}

/// Dashboard for the initial control state.
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let dataset = current_dataset(&state).await?;
    let selection = controls(&dataset.table, &state.settings).defaults;
    Ok(Json(DashboardResponse {
        dataset_version: dataset.version.clone(),
        view: render(&dataset.table, &selection, &state.settings),
    }))
}

pub async fn post_dashboard(
    State(state): State<AppState>,
    Json(selection): Json<FilterSelection>,
) -> Result<Json<DashboardResponse>, ApiError> {
    if let Some(range) = selection.capacity_range {
        if !range.min.is_finite() || !range.max.is_finite() {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "capacity_range bounds must be finite",
            ));
        }
    }
    let dataset = current_dataset(&state).await?;
    Ok(Json(DashboardResponse {
        dataset_version: dataset.version.clone(),
        view: render(&dataset.table, &selection, &state.settings),
    }))
}
