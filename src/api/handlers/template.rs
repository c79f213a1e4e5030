use axum::Json;

use crate::models::ParseTemplateRequest;
use crate::template::{parse_template, FieldSpec};

/// Parse a field template into field specs
pub async fn parse(Json(req): Json<ParseTemplateRequest>) -> Json<Vec<FieldSpec>> {
    Json(parse_template(&req.text))
}
