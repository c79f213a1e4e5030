use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::CaseItem;
use crate::executive::Executive;
use crate::history::HistoryEntry;
use crate::prefill::DataMap;
use crate::template::FieldSpec;
use crate::typify::{HiddenSubmission, PreparedForm};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub persistent_storage: bool,
}

#[derive(Debug, Serialize)]
pub struct PrefillUrlResponse {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct SliceResponse {
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct CaseListResponse {
    pub cases: Vec<CaseItem>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct CaseDetailResponse {
    pub case: CaseItem,
    pub title: String,
    /// Parsed `campos_extra` template
    pub fields: Vec<FieldSpec>,
    pub tipificacion_h: Vec<String>,
    pub tipificacion_i: Vec<String>,
    pub verificaciones: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogSummaryResponse {
    pub cases: usize,
    pub options: usize,
    pub forms: usize,
    pub hidden_forms: usize,
    pub fixed_fields: usize,
    pub agents: usize,
}

#[derive(Debug, Serialize)]
pub struct AutofillResponse {
    pub values: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct CopyResponse {
    pub text: String,
    pub data: DataMap,
    pub entry: HistoryEntry,
    pub submission: Option<HiddenSubmission>,
}

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub forms: Vec<PreparedForm>,
}

#[derive(Debug, Serialize)]
pub struct HistoryListResponse {
    pub entries: Vec<HistoryEntry>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ExecutiveResponse {
    pub executive: Option<Executive>,
}

#[derive(Debug, Serialize)]
pub struct SaveExecutiveResponse {
    pub name: String,
}
