use serde::{Deserialize, Serialize};

use super::mapping::MappingRow;
use super::slice::apply_slice;
use super::DataMap;
use crate::text::{is_blank, upper_label};

/// One destination id with its computed (unencoded) value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefillParam {
    pub destination_id: String,
    pub value: String,
}

impl PrefillParam {
    /// `encoded_id=encoded_value`
    pub fn encoded(&self) -> String {
        format!(
            "{}={}",
            urlencoding::encode(&self.destination_id),
            urlencoding::encode(&self.value)
        )
    }
}

/// Compute the prefill parameters for every row that resolves to a value.
pub fn build_prefill_params(rows: &[MappingRow], data: &DataMap) -> Vec<PrefillParam> {
    rows.iter().filter_map(|row| row_value(row, data)).collect()
}

fn row_value(row: &MappingRow, data: &DataMap) -> Option<PrefillParam> {
    let destination_id = row.destination_id.trim();
    if destination_id.is_empty() {
        return None;
    }

    let names = row.resolved_names();
    let value = match names.as_slice() {
        [] => return None,
        [name] => single_value(row, name, data)?,
        _ => combined_value(row, &names, data)?,
    };

    Some(PrefillParam {
        destination_id: destination_id.to_string(),
        value,
    })
}

fn single_value(row: &MappingRow, name: &str, data: &DataMap) -> Option<String> {
    let raw = data.get(name).map(String::as_str);
    let value = match row.slice_specs.first() {
        Some(spec) => apply_slice(raw, spec),
        None => raw?.to_string(),
    };
    if is_blank(Some(&value)) {
        None
    } else {
        Some(value)
    }
}

fn combined_value(row: &MappingRow, names: &[&str], data: &DataMap) -> Option<String> {
    let mut lines = Vec::new();

    for (idx, name) in names.iter().enumerate() {
        let raw = data.get(*name).map(String::as_str);
        let value = match row.slice_for(idx) {
            Some(spec) => apply_slice(raw, spec),
            None => raw.unwrap_or_default().to_string(),
        };
        if is_blank(Some(&value)) {
            continue;
        }

        let label = match row.label_for(idx) {
            Some(label) => label.to_uppercase(),
            None => upper_label(name),
        };
        lines.push(format!("{}: {}", label, value));
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Join encoded parameters into a query string; `None` when there are none.
pub fn prefill_query(rows: &[MappingRow], data: &DataMap) -> Option<String> {
    let params = build_prefill_params(rows, data);
    if params.is_empty() {
        return None;
    }
    Some(
        params
            .iter()
            .map(PrefillParam::encoded)
            .collect::<Vec<_>>()
            .join("&"),
    )
}

/// Append the prefill query to `base`. With nothing to fill, `base` is returned untouched.
pub fn build_prefill_url(base: &str, rows: &[MappingRow], data: &DataMap) -> String {
    match prefill_query(rows, data) {
        Some(query) => {
            let sep = if base.contains('?') { '&' } else { '?' };
            format!("{}{}{}", base, sep, query)
        }
        None => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> DataMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_single_field_passes_raw_value() {
        let rows = vec![MappingRow::from_cells("nombre", "", "", "entry.9")];
        let params = build_prefill_params(&rows, &data(&[("nombre", " Ana Pérez ")]));
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].value, " Ana Pérez ");
    }

    #[test]
    fn test_single_field_blank_or_missing_is_skipped() {
        let rows = vec![
            MappingRow::from_cells("nombre", "", "", "entry.1"),
            MappingRow::from_cells("falta", "", "", "entry.2"),
        ];
        assert!(build_prefill_params(&rows, &data(&[("nombre", "   ")])).is_empty());
    }

    #[test]
    fn test_single_field_uses_first_slice() {
        let rows = vec![MappingRow::from_cells("obs", "", "RUT:||,;ignored||", "entry.3")];
        let params = build_prefill_params(&rows, &data(&[("obs", "RUT: 1-9, fin")]));
        assert_eq!(params[0].value, "1-9");
    }

    #[test]
    fn test_multi_field_lines() {
        let rows = vec![MappingRow::from_cells("id;rut", "ID;RUT", "", "entry.1")];
        let params = build_prefill_params(&rows, &data(&[("id", "123"), ("rut", "1-1")]));
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].value, "ID: 123\nRUT: 1-1");
        assert_eq!(params[0].encoded(), "entry.1=ID%3A%20123%0ARUT%3A%201-1");
    }

    #[test]
    fn test_multi_field_default_labels_and_dropped_lines() {
        let rows = vec![MappingRow::from_cells(
            "ejecutivo_cedula;vacio;motivo",
            "",
            "",
            "entry.5",
        )];
        let params = build_prefill_params(
            &rows,
            &data(&[("ejecutivo_cedula", "111"), ("vacio", " "), ("motivo", "Reclamo")]),
        );
        assert_eq!(params[0].value, "EJECUTIVO CEDULA: 111\nMOTIVO: Reclamo");
    }

    #[test]
    fn test_multi_field_labels_are_uppercased() {
        let rows = vec![MappingRow::from_cells("a;b", "Primero", "", "e")];
        let params = build_prefill_params(&rows, &data(&[("a", "1"), ("b", "2")]));
        assert_eq!(params[0].value, "PRIMERO: 1\nB: 2");
    }

    #[test]
    fn test_multi_field_shared_slice() {
        let rows = vec![MappingRow::from_cells("a;b", "", "[||]", "e")];
        let params = build_prefill_params(&rows, &data(&[("a", "x[1]"), ("b", "no brackets")]));
        // "b" has no start marker and is dropped from the concatenation
        assert_eq!(params[0].value, "A: 1");
    }

    #[test]
    fn test_all_empty_row_contributes_nothing() {
        let rows = vec![
            MappingRow::from_cells("a;b", "", "", "entry.1"),
            MappingRow::from_cells("c", "", "", "entry.2"),
        ];
        let d = data(&[("a", ""), ("b", " "), ("c", "ok")]);
        let url = build_prefill_url("https://forms.example/viewform", &rows, &d);
        assert_eq!(url, "https://forms.example/viewform?entry.2=ok");
    }

    #[test]
    fn test_rows_without_destination_are_skipped() {
        let rows = vec![MappingRow::from_cells("a", "", "", "  ")];
        assert!(build_prefill_params(&rows, &data(&[("a", "1")])).is_empty());
    }

    #[test]
    fn test_url_assembly() {
        let rows = vec![
            MappingRow::from_cells("a", "", "", "entry.1"),
            MappingRow::from_cells("b", "", "", "entry.2"),
        ];
        let d = data(&[("a", "x y"), ("b", "z&w")]);
        assert_eq!(
            build_prefill_url("https://f.example/form?usp=pp_url", &rows, &d),
            "https://f.example/form?usp=pp_url&entry.1=x%20y&entry.2=z%26w"
        );
        assert_eq!(
            build_prefill_url("https://f.example/form", &rows, &DataMap::new()),
            "https://f.example/form"
        );
    }
}
