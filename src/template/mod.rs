//! Dynamic field templates.
//!
//! A template such as
//! `Nombre|type=input:Ingrese nombre;Región|choices=Norte;Centro;Sur:Elige región`
//! describes the extra inputs a case needs. Parsing runs in two phases:
//! [`scanner::split_fields`] cuts the text into field segments, then
//! [`field::parse_field`] reads each segment's label, metadata and placeholder.

pub mod field;
pub mod scanner;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub use field::parse_field;
pub use scanner::split_fields;

/// Kind of control rendered for a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Textarea,
    Input,
    Choices,
}

/// Metadata value: `key=value` or a bare flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Flag(bool),
    Text(String),
}

impl MetaValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            MetaValue::Flag(_) => None,
        }
    }
}

/// One parsed dynamic field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub label: String,
    pub field_name: String,
    pub kind: FieldKind,
    /// Only populated for [`FieldKind::Choices`]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    pub placeholder: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, MetaValue>,
}

impl FieldSpec {
    /// Label shown next to the control.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.field_name
        } else {
            &self.label
        }
    }

    /// Placeholder text, falling back to a `placeholder=` metadata entry.
    pub fn effective_placeholder(&self) -> &str {
        if !self.placeholder.is_empty() {
            return &self.placeholder;
        }
        self.meta
            .get("placeholder")
            .and_then(MetaValue::as_text)
            .unwrap_or_default()
    }
}

/// Parse a full template. Never fails; malformed input yields fewer fields.
pub fn parse_template(text: &str) -> Vec<FieldSpec> {
    split_fields(text).iter().map(|s| parse_field(s)).collect()
}

/// Collect submitted values into a flat map keyed by field name.
/// Specs sharing a name collapse to the last one.
pub fn collect_values(
    specs: &[FieldSpec],
    values: &HashMap<String, String>,
) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for spec in specs {
        let value = values.get(&spec.field_name).cloned().unwrap_or_default();
        out.insert(spec.field_name.clone(), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_field() {
        let fields = parse_template("Nombre|type=input:Ingrese nombre");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].label, "Nombre");
        assert_eq!(fields[0].kind, FieldKind::Input);
        assert_eq!(fields[0].placeholder, "Ingrese nombre");
        assert_eq!(fields[0].field_name, "nombre");
    }

    #[test]
    fn test_choices_field() {
        let fields = parse_template("Región|choices=Norte;Centro;Sur:Elige región");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].kind, FieldKind::Choices);
        assert_eq!(fields[0].choices, vec!["Norte", "Centro", "Sur"]);
        assert_eq!(fields[0].placeholder, "Elige región");
    }

    #[test]
    fn test_empty_placeholders() {
        let fields = parse_template("A:;B:valB");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].label, "A");
        assert_eq!(fields[0].placeholder, "");
        assert_eq!(fields[1].label, "B");
        assert_eq!(fields[1].placeholder, "valB");
    }

    #[test]
    fn test_mixed_template() {
        let fields = parse_template(
            "Motivo;Estado|choices=Abierto;Cerrado:Seleccione;Teléfono|type=input|name=telefono:+56",
        );
        let names: Vec<&str> = fields.iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, vec!["motivo", "estado", "telefono"]);
        assert_eq!(fields[2].placeholder, "+56");
    }

    #[test]
    fn test_effective_placeholder_and_display_label() {
        let fields = parse_template("|name=extra|placeholder=Escriba aquí");
        assert_eq!(fields[0].display_label(), "extra");
        assert_eq!(fields[0].placeholder, "");
        assert_eq!(fields[0].effective_placeholder(), "Escriba aquí");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = "A|choices=x;y:p;B|type=input;C|flag";
        assert_eq!(parse_template(text), parse_template(text));
    }

    #[test]
    fn test_collect_values_last_wins() {
        let specs = parse_template("Nota;Nota|type=input;Otro");
        let mut values = HashMap::new();
        values.insert("nota".to_string(), "hola".to_string());
        let collected = collect_values(&specs, &values);
        assert_eq!(collected.len(), 2);
        assert_eq!(collected["nota"], "hola");
        assert_eq!(collected["otro"], "");
    }
}
