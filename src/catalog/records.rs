use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::source::Sheet;
use crate::prefill::MappingRow;
use crate::template::{FieldKind, FieldSpec};
use crate::text::{is_blank, normalize_cedula, normalize_hex, normalize_header, slugify, split_list};

/// One spreadsheet row keyed by normalised header.
pub type Record = BTreeMap<String, String>;

/// Turn a sheet into records. Row 0 is the header row; an empty header
/// becomes `col<index>` and missing cells read as empty strings.
pub fn sheet_records(sheet: &Sheet) -> Vec<Record> {
    let Some((header_row, rows)) = sheet.split_first() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(c, h)| {
            let h = normalize_header(h);
            if h.is_empty() {
                format!("col{}", c)
            } else {
                h
            }
        })
        .collect();

    rows.iter()
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(c, h)| (h.clone(), row.get(c).cloned().unwrap_or_default()))
                .collect()
        })
        .collect()
}

fn field(record: &Record, key: &str) -> String {
    record.get(key).cloned().unwrap_or_default()
}

fn present(record: &Record, key: &str) -> bool {
    !is_blank(record.get(key))
}

/// A case from the `data` workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseItem {
    pub id: String,
    pub titulo: String,
    pub subtitulo: String,
    pub color: Option<String>,
    pub tipificacion_h: String,
    pub tipificacion_i: String,
    pub motivo: String,
    pub verificaciones: String,
    pub sugerencias: String,
    pub campos_extra: String,
    /// Every column of the source row, including the ones above
    pub fields: Record,
}

impl CaseItem {
    /// `None` for rows without an id.
    pub fn from_record(record: Record) -> Option<Self> {
        if !present(&record, "id") {
            return None;
        }
        let mut fields = record;
        let color = normalize_hex(&field(&fields, "color"));
        match &color {
            Some(c) => fields.insert("color".to_string(), c.clone()),
            None => fields.remove("color"),
        };

        Some(Self {
            id: field(&fields, "id"),
            titulo: field(&fields, "titulo"),
            subtitulo: field(&fields, "subtitulo"),
            color,
            tipificacion_h: field(&fields, "tipificacion_h"),
            tipificacion_i: field(&fields, "tipificacion_i"),
            motivo: field(&fields, "motivo"),
            verificaciones: field(&fields, "verificaciones"),
            sugerencias: field(&fields, "sugerencias"),
            campos_extra: field(&fields, "campos_extra"),
            fields,
        })
    }

    /// Title shown on cards; falls back to the id.
    pub fn display_title(&self) -> &str {
        if self.titulo.is_empty() {
            &self.id
        } else {
            &self.titulo
        }
    }

    pub fn tipificacion_h_items(&self) -> Vec<String> {
        split_list(&self.tipificacion_h, ',')
    }

    pub fn tipificacion_i_items(&self) -> Vec<String> {
        split_list(&self.tipificacion_i, ',')
    }

    pub fn verificacion_items(&self) -> Vec<String> {
        split_list(&self.verificaciones, ',')
    }
}

/// Segmented option shown above the option-specific fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRecord {
    pub option_key: String,
    pub option_label: String,
    pub form_key: String,
}

impl OptionRecord {
    pub fn from_record(record: &Record) -> Option<Self> {
        if !present(record, "option_key") {
            return None;
        }
        Some(Self {
            option_key: field(record, "option_key"),
            option_label: field(record, "option_label"),
            form_key: field(record, "form_key"),
        })
    }
}

const CHOICE_COLUMNS: [&str; 4] = ["field_choices", "choices", "field_options", "options"];

/// Field belonging to one option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionFieldRecord {
    pub option_key: String,
    pub field_name: String,
    pub field_label: String,
    pub field_placeholder: String,
    pub field_type: String,
    pub field_choices: String,
}

impl OptionFieldRecord {
    pub fn from_record(record: &Record) -> Option<Self> {
        if !present(record, "option_key") || !present(record, "field_name") {
            return None;
        }
        let field_choices = CHOICE_COLUMNS
            .iter()
            .map(|col| field(record, col))
            .find(|v| !v.trim().is_empty())
            .unwrap_or_default();
        Some(Self {
            option_key: field(record, "option_key"),
            field_name: field(record, "field_name"),
            field_label: field(record, "field_label"),
            field_placeholder: field(record, "field_placeholder"),
            field_type: field(record, "field_type"),
            field_choices,
        })
    }

    pub fn to_field_spec(&self) -> FieldSpec {
        sheet_field_spec(
            &self.field_name,
            &self.field_label,
            &self.field_placeholder,
            &self.field_type,
            &self.field_choices,
        )
    }
}

/// Form opened by the send action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormTarget {
    pub form_key: String,
    pub form_url: String,
}

impl FormTarget {
    pub fn from_record(record: &Record) -> Option<Self> {
        if !present(record, "form_key") || !present(record, "form_url") {
            return None;
        }
        Some(Self {
            form_key: field(record, "form_key"),
            form_url: field(record, "form_url"),
        })
    }
}

/// Raw mapping row as written in the spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormMappingRecord {
    pub form_key: String,
    pub field_name: String,
    pub field_label: String,
    pub field_slice: String,
    pub form_entry_id: String,
    /// Fixed value sent when the data has no such field
    pub value: String,
}

impl FormMappingRecord {
    fn from_record_unchecked(record: &Record) -> Self {
        Self {
            form_key: field(record, "form_key"),
            field_name: field(record, "field_name"),
            field_label: field(record, "field_label"),
            field_slice: field(record, "field_slice"),
            form_entry_id: field(record, "form_entry_id"),
            value: field(record, "value"),
        }
    }

    /// Prefill mapping rows need a field name, a form key and an entry id.
    pub fn from_record(record: &Record) -> Option<Self> {
        if !present(record, "field_name") || !present(record, "form_key") {
            return None;
        }
        Self::from_record_silent(record)
    }

    /// Background-submission rows may omit the field name.
    pub fn from_record_silent(record: &Record) -> Option<Self> {
        if !present(record, "form_key") || !present(record, "form_entry_id") {
            return None;
        }
        Some(Self::from_record_unchecked(record))
    }

    pub fn to_mapping_row(&self) -> MappingRow {
        MappingRow::from_cells(
            &self.field_name,
            &self.field_label,
            &self.field_slice,
            &self.form_entry_id,
        )
    }
}

/// Forms plus their entry mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormsMapping {
    pub forms: Vec<FormTarget>,
    pub mapping: Vec<FormMappingRecord>,
}

impl FormsMapping {
    pub fn form(&self, form_key: &str) -> Option<&FormTarget> {
        self.forms.iter().find(|f| f.form_key == form_key)
    }

    pub fn rows_for(&self, form_key: &str) -> Vec<MappingRow> {
        self.records_for(form_key)
            .map(FormMappingRecord::to_mapping_row)
            .collect()
    }

    pub fn records_for<'a>(
        &'a self,
        form_key: &'a str,
    ) -> impl Iterator<Item = &'a FormMappingRecord> + 'a {
        self.mapping
            .iter()
            .filter(move |m| m.form_key.trim() == form_key.trim())
    }
}

/// Fixed field rendered on every typification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedFieldDef {
    pub field_name: String,
    pub field_label: String,
    pub field_placeholder: String,
    pub field_type: String,
    pub field_choices: String,
    /// `;`-separated case columns to auto-fill from
    pub field_sources: String,
    pub auto_fill: bool,
}

impl FixedFieldDef {
    pub fn from_record(record: &Record) -> Option<Self> {
        if !present(record, "field_name") {
            return None;
        }
        Some(Self {
            field_name: field(record, "field_name").trim().to_string(),
            field_label: field(record, "field_label"),
            field_placeholder: field(record, "field_placeholder"),
            field_type: field(record, "field_type"),
            field_choices: field(record, "field_choices"),
            field_sources: field(record, "field_sources"),
            auto_fill: field(record, "auto_fill").trim().eq_ignore_ascii_case("true"),
        })
    }

    pub fn to_field_spec(&self) -> FieldSpec {
        sheet_field_spec(
            &self.field_name,
            &self.field_label,
            &self.field_placeholder,
            &self.field_type,
            &self.field_choices,
        )
    }
}

fn sheet_field_spec(name: &str, label: &str, placeholder: &str, kind: &str, choices: &str) -> FieldSpec {
    let (kind, choices) = if !choices.trim().is_empty() || kind.trim().eq_ignore_ascii_case("choices") {
        (FieldKind::Choices, split_list(choices, ';'))
    } else if kind.trim().eq_ignore_ascii_case("input") {
        (FieldKind::Input, Vec::new())
    } else {
        (FieldKind::Textarea, Vec::new())
    };
    let field_name = if name.trim().is_empty() {
        slugify(label)
    } else {
        name.trim().to_string()
    };

    FieldSpec {
        label: if label.is_empty() { field_name.clone() } else { label.to_string() },
        field_name,
        kind,
        choices,
        placeholder: placeholder.trim().to_string(),
        meta: BTreeMap::new(),
    }
}

/// Cedula to name lookup from the headerless `agent` workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentDirectory {
    rows: Vec<(String, String)>,
}

impl AgentDirectory {
    pub fn from_sheet(sheet: &Sheet) -> Self {
        let rows = sheet
            .iter()
            .map(|row| {
                (
                    row.first().cloned().unwrap_or_default(),
                    row.get(1).cloned().unwrap_or_default(),
                )
            })
            .collect();
        Self { rows }
    }

    /// Name for a cedula; both sides are normalised before comparing.
    pub fn find_name(&self, cedula: &str) -> Option<&str> {
        let wanted = normalize_cedula(cedula);
        self.rows
            .iter()
            .find(|(c, _)| normalize_cedula(c) == wanted)
            .map(|(_, name)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
