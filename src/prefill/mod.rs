//! Prefill mapping for externally hosted forms.
//!
//! Mapping rows bind source data keys to form entry ids. Values can be cut
//! with the `start||end` slice operator and several keys can be merged into
//! one multi-line value.

pub mod mapper;
pub mod mapping;
pub mod slice;
pub mod submit;

use std::collections::BTreeMap;

pub use mapper::{build_prefill_params, build_prefill_url, prefill_query, PrefillParam};
pub use mapping::MappingRow;
pub use slice::{apply_slice, SliceSpec};
pub use submit::{fallback_url, form_response_url};

/// Flat source data: field name to value.
pub type DataMap = BTreeMap<String, String>;
