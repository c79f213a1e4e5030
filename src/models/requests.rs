use serde::Deserialize;

use crate::prefill::{DataMap, MappingRow};
use crate::typify::ActiveField;

#[derive(Debug, Deserialize)]
pub struct ParseTemplateRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct PrefillUrlRequest {
    pub base_url: String,
    #[serde(default)]
    pub rows: Vec<MappingRow>,
    #[serde(default)]
    pub data: DataMap,
}

#[derive(Debug, Deserialize)]
pub struct SliceRequest {
    pub value: Option<String>,
    #[serde(default)]
    pub slice: String,
}

/// `?q=` filter shared by case and history listings
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AutofillRequest {
    pub case_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CopyRequest {
    #[serde(default)]
    pub fields: Vec<ActiveField>,
    /// Submit the hidden form without opening it
    #[serde(default = "default_silent")]
    pub silent: bool,
    /// Display datetime stored with the history entry
    pub datetime: Option<String>,
}

fn default_silent() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct SendRequest {
    #[serde(default)]
    pub fields: Vec<ActiveField>,
    pub selected_option: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveExecutiveRequest {
    #[serde(default)]
    pub cedula: String,
}
