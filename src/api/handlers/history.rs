use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::history::{export_rows, export_txt};
use crate::models::{HistoryListResponse, SearchQuery};

use super::super::state::AppState;

/// List history entries, newest first, optionally filtered by `q`
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<HistoryListResponse>> {
    let catalog = state.catalog.read().await;
    let entries = state
        .history
        .search(query.q.as_deref().unwrap_or(""), &catalog.history_schema)
        .map_err(AppError::storage)?;

    Ok(Json(HistoryListResponse {
        total: entries.len(),
        entries,
    }))
}

pub async fn clear_history(State(state): State<Arc<AppState>>) -> Result<StatusCode> {
    state.history.clear().map_err(AppError::storage)?;
    tracing::info!("History cleared");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(entry_id): Path<String>,
) -> Result<StatusCode> {
    if !state.history.remove(&entry_id).map_err(AppError::storage)? {
        return Err(AppError::NotFound(format!("History entry {}", entry_id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Plain-text export download
pub async fn export_text(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let entries = state.history.entries().map_err(AppError::storage)?;
    let catalog = state.catalog.read().await;
    let body = export_txt(&entries, &catalog.history_schema);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"historico.txt\"",
            ),
        ],
        body,
    ))
}

/// Tabular export: header row plus one row per entry
pub async fn export_table(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Vec<String>>>> {
    let entries = state.history.entries().map_err(AppError::storage)?;
    let catalog = state.catalog.read().await;
    Ok(Json(export_rows(&entries, &catalog.history_schema)))
}
