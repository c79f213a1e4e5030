use serde::{Deserialize, Serialize};

use crate::text::split_list;

/// Binds one or more source keys to a destination field of an external form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRow {
    pub field_names: Vec<String>,
    /// Positional label overrides for multi-field rows
    #[serde(default)]
    pub field_labels: Vec<String>,
    /// Positional slice specs, or a single spec shared by every field
    #[serde(default)]
    pub slice_specs: Vec<String>,
    pub destination_id: String,
}

impl MappingRow {
    /// Build a row from spreadsheet cells where lists are `;`-separated.
    pub fn from_cells(field_name: &str, field_label: &str, field_slice: &str, entry_id: &str) -> Self {
        Self {
            field_names: split_list(field_name, ';'),
            field_labels: split_list(field_label, ';'),
            slice_specs: split_list(field_slice, ';'),
            destination_id: entry_id.trim().to_string(),
        }
    }

    /// Slice spec for the field at `idx`: positional when available,
    /// otherwise the single shared spec.
    pub fn slice_for(&self, idx: usize) -> Option<&str> {
        if let Some(spec) = self.slice_specs.get(idx) {
            return Some(spec);
        }
        if self.slice_specs.len() == 1 {
            return self.slice_specs.first().map(String::as_str);
        }
        None
    }

    pub(crate) fn resolved_names(&self) -> Vec<&str> {
        self.field_names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .collect()
    }

    pub(crate) fn label_for(&self, idx: usize) -> Option<&str> {
        self.field_labels
            .get(idx)
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
    }
}
