use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::catalog::search_cases;
use crate::error::{AppError, Result};
use crate::models::{CaseDetailResponse, CaseListResponse, CatalogSummaryResponse, SearchQuery};
use crate::template::{parse_template, FieldSpec};

use super::super::state::AppState;

/// Search cases by title or id
pub async fn list_cases(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Json<CaseListResponse> {
    let catalog = state.catalog.read().await;
    let cases: Vec<_> = search_cases(&catalog.cases, query.q.as_deref().unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();

    Json(CaseListResponse {
        total: cases.len(),
        cases,
    })
}

/// Get one case with its extra fields parsed
pub async fn get_case(
    State(state): State<Arc<AppState>>,
    Path(case_id): Path<String>,
) -> Result<Json<CaseDetailResponse>> {
    let catalog = state.catalog.read().await;
    let case = catalog
        .case(&case_id)
        .ok_or_else(|| AppError::NotFound(format!("Case {}", case_id)))?;

    Ok(Json(CaseDetailResponse {
        title: case.display_title().to_string(),
        fields: parse_template(&case.campos_extra),
        tipificacion_h: case.tipificacion_h_items(),
        tipificacion_i: case.tipificacion_i_items(),
        verificaciones: case.verificacion_items(),
        case: case.clone(),
    }))
}

/// Reload every workbook from the configured source
pub async fn reload_catalog(State(state): State<Arc<AppState>>) -> Json<CatalogSummaryResponse> {
    state.reload_catalog().await;
    let catalog = state.catalog.read().await;

    Json(CatalogSummaryResponse {
        cases: catalog.cases.len(),
        options: catalog.options.len(),
        forms: catalog.forms.forms.len(),
        hidden_forms: catalog.hidden_forms.forms.len(),
        fixed_fields: catalog.fixed_fields.len(),
        agents: catalog.agents.len(),
    })
}

/// Fields configured for one option
pub async fn get_option_fields(
    State(state): State<Arc<AppState>>,
    Path(option_key): Path<String>,
) -> Result<Json<Vec<FieldSpec>>> {
    let catalog = state.catalog.read().await;
    if catalog.option(&option_key).is_none() {
        return Err(AppError::NotFound(format!("Option {}", option_key)));
    }
    Ok(Json(catalog.option_field_specs(&option_key)))
}
