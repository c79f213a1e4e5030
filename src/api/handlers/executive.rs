use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{ExecutiveResponse, SaveExecutiveRequest, SaveExecutiveResponse};

use super::super::state::AppState;

pub async fn get_executive(State(state): State<Arc<AppState>>) -> Result<Json<ExecutiveResponse>> {
    let executive = state.executive.get().map_err(AppError::storage)?;
    Ok(Json(ExecutiveResponse { executive }))
}

/// Save the executive by cedula; the name comes from the agent directory
pub async fn save_executive(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveExecutiveRequest>,
) -> Result<Json<SaveExecutiveResponse>> {
    let catalog = state.catalog.read().await;
    let name = state
        .executive
        .save(&req.cedula, &catalog.agents)
        .map_err(AppError::storage)?;
    Ok(Json(SaveExecutiveResponse { name }))
}

pub async fn delete_executive(State(state): State<Arc<AppState>>) -> Result<StatusCode> {
    state.executive.delete().map_err(AppError::storage)?;
    Ok(StatusCode::NO_CONTENT)
}
