use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{AutofillRequest, AutofillResponse, CopyRequest, CopyResponse, SendRequest, SendResponse};
use crate::typify::{autofill_fixed_fields, collect_data, plan_dispatch, plan_hidden_submission, summary_text};

use super::super::state::AppState;

/// Values for the fixed fields taken from a case
pub async fn autofill(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AutofillRequest>,
) -> Result<Json<AutofillResponse>> {
    let catalog = state.catalog.read().await;
    let item = catalog
        .case(&req.case_id)
        .ok_or_else(|| AppError::NotFound(format!("Case {}", req.case_id)))?;

    Ok(Json(AutofillResponse {
        values: autofill_fixed_fields(&catalog.fixed_fields, item),
    }))
}

/// Build the clipboard text, record it in history and plan the hidden form submission
pub async fn copy(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CopyRequest>,
) -> Result<Json<CopyResponse>> {
    let text = summary_text(&req.fields);
    if text.is_empty() {
        return Err(AppError::Validation("No field has a value".to_string()));
    }

    let executive = state.executive.get().map_err(AppError::storage)?;
    let data = collect_data(&req.fields, executive.as_ref());

    let entry = state
        .history
        .add(data.clone(), text.clone(), req.datetime)
        .map_err(AppError::storage)?;

    let catalog = state.catalog.read().await;
    let submission = plan_hidden_submission(
        &catalog.hidden_forms,
        Some(state.config.form_key.as_str()),
        req.silent,
        &data,
    );
    if submission.is_none() {
        tracing::debug!("No hidden form configured, skipping background submission");
    }

    Ok(Json(CopyResponse {
        text,
        data,
        entry,
        submission,
    }))
}

/// Prefilled URLs for the forms targeted by the selected option
pub async fn send(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendRequest>,
) -> Result<Json<SendResponse>> {
    let executive = state.executive.get().map_err(AppError::storage)?;
    let data = collect_data(&req.fields, executive.as_ref());

    let catalog = state.catalog.read().await;
    if catalog.forms.forms.is_empty() {
        return Err(AppError::NotFound("No forms configured".to_string()));
    }

    let forms = plan_dispatch(
        &catalog.forms,
        &catalog.options,
        req.selected_option.as_deref(),
        &data,
        Utc::now().timestamp_millis(),
    );
    tracing::info!("Prepared {} forms", forms.len());

    Ok(Json(SendResponse { forms }))
}
