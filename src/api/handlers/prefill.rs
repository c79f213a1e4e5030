use axum::Json;

use crate::error::{AppError, Result};
use crate::models::{PrefillUrlRequest, PrefillUrlResponse, SliceRequest, SliceResponse};
use crate::prefill::{apply_slice, build_prefill_url};

/// Build a prefilled form URL from mapping rows and source data
pub async fn prefill_url(Json(req): Json<PrefillUrlRequest>) -> Result<Json<PrefillUrlResponse>> {
    if req.base_url.trim().is_empty() {
        return Err(AppError::Validation("base_url is required".to_string()));
    }
    Ok(Json(PrefillUrlResponse {
        url: build_prefill_url(&req.base_url, &req.rows, &req.data),
    }))
}

/// Apply a `start||end` slice to a value
pub async fn slice(Json(req): Json<SliceRequest>) -> Json<SliceResponse> {
    Json(SliceResponse {
        value: apply_slice(req.value.as_deref(), &req.slice),
    })
}
