//! End-to-end checks of the two text formats agents configure by hand: the
//! field template mini-language and the prefill mapping with slices.

use std::collections::HashMap;

use tipifica::prefill::{apply_slice, build_prefill_params, build_prefill_url, DataMap, MappingRow};
use tipifica::template::{collect_values, parse_template, FieldKind};

fn data(pairs: &[(&str, &str)]) -> DataMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn row(names: &[&str], labels: &[&str], slices: &[&str], entry: &str) -> MappingRow {
    MappingRow {
        field_names: names.iter().map(|s| s.to_string()).collect(),
        field_labels: labels.iter().map(|s| s.to_string()).collect(),
        slice_specs: slices.iter().map(|s| s.to_string()).collect(),
        destination_id: entry.to_string(),
    }
}

// ============================================================================
// Templates
// ============================================================================

#[test]
fn test_case_template_renders_all_kinds() {
    let fields = parse_template(
        "Nombre|type=input:Ingrese nombre;Región|choices=Norte;Centro;Sur:Elige región;Observaciones",
    );
    assert_eq!(fields.len(), 3);

    assert_eq!(fields[0].field_name, "nombre");
    assert_eq!(fields[0].kind, FieldKind::Input);
    assert_eq!(fields[0].placeholder, "Ingrese nombre");

    assert_eq!(fields[1].kind, FieldKind::Choices);
    assert_eq!(fields[1].choices, vec!["Norte", "Centro", "Sur"]);
    assert_eq!(fields[1].placeholder, "Elige región");

    assert_eq!(fields[2].label, "Observaciones");
    assert_eq!(fields[2].kind, FieldKind::Textarea);
    assert_eq!(fields[2].placeholder, "");
}

#[test]
fn test_empty_placeholders_and_separators() {
    let fields = parse_template("A:;B:valB;;  ;");
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].label, "A");
    assert_eq!(fields[0].placeholder, "");
    assert_eq!(fields[1].label, "B");
    assert_eq!(fields[1].placeholder, "valB");
}

#[test]
fn test_unterminated_choices_is_one_field() {
    let fields = parse_template("Canal|choices=Web;Tienda;Teléfono");
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].choices, vec!["Web", "Tienda", "Teléfono"]);
}

#[test]
fn test_parser_is_deterministic() {
    let text = "Motivo|name=motivo_baja|type=input:¿Por qué?;Región|choices=N;S:";
    assert_eq!(parse_template(text), parse_template(text));
}

#[test]
fn test_collected_values_feed_the_mapper() {
    let specs = parse_template("Nombre|type=input;RUT|name=rut");
    let mut rendered = HashMap::new();
    rendered.insert("nombre".to_string(), "Ana".to_string());
    rendered.insert("rut".to_string(), "1-9".to_string());

    let values = collect_values(&specs, &rendered);
    let url = build_prefill_url(
        "https://forms.example/f/viewform",
        &[row(&["nombre", "rut"], &[], &[], "entry.5")],
        &values,
    );
    assert_eq!(
        url,
        "https://forms.example/f/viewform?entry.5=NOMBRE%3A%20Ana%0ARUT%3A%201-9"
    );
}

// ============================================================================
// Prefill
// ============================================================================

#[test]
fn test_slice_examples() {
    assert_eq!(apply_slice(Some("ID: 123, RUT: 1-1"), "ID: ||,"), "123");
    assert_eq!(apply_slice(Some("abc"), "XYZ||"), "");
    assert_eq!(apply_slice(Some("  full  "), "||"), "full");
    assert_eq!(apply_slice(Some("a-b-c"), "||x"), "a-b-c");
}

#[test]
fn test_multi_field_row() {
    let params = build_prefill_params(
        &[row(&["id", "rut"], &["ID", "RUT"], &[], "entry.1")],
        &data(&[("id", "123"), ("rut", "1-1")]),
    );
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].encoded(), "entry.1=ID%3A%20123%0ARUT%3A%201-1");
}

#[test]
fn test_shared_slice_and_dropped_lines() {
    let params = build_prefill_params(
        &[row(&["a", "b", "c"], &[], &["<||>"], "entry.2")],
        &data(&[("a", "x<1>"), ("b", "sin marcador"), ("c", "<2>")]),
    );
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].value, "A: 1\nC: 2");
}

#[test]
fn test_rows_without_values_leave_base_untouched() {
    let base = "https://forms.example/f?usp=pp_url";
    let rows = vec![
        row(&["falta"], &[], &[], "entry.1"),
        row(&["id"], &[], &[], ""),
        row(&[], &[], &[], "entry.3"),
    ];
    assert_eq!(build_prefill_url(base, &rows, &data(&[("id", "1")])), base);
}

#[test]
fn test_query_separator_follows_base() {
    let rows = vec![row(&["id"], &[], &[], "entry.1")];
    let d = data(&[("id", "7")]);
    assert_eq!(
        build_prefill_url("https://forms.example/f?usp=pp_url", &rows, &d),
        "https://forms.example/f?usp=pp_url&entry.1=7"
    );
    assert_eq!(
        build_prefill_url("https://forms.example/f", &rows, &d),
        "https://forms.example/f?entry.1=7"
    );
}
