//! Call-center typification service.
//!
//! Cases and form mappings come from spreadsheet exports; agents pick a case,
//! fill the dynamic fields it describes, copy a summary and open prefilled
//! external forms.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod executive;
pub mod history;
pub mod models;
pub mod prefill;
pub mod storage;
pub mod template;
pub mod text;
pub mod typify;
