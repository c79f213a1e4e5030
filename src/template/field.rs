use std::collections::BTreeMap;

use super::{FieldKind, FieldSpec, MetaValue};
use crate::text::{is_blank, slugify, split_list};

/// Parse one raw field segment: `label|key=value|flag:placeholder`.
pub fn parse_field(segment: &str) -> FieldSpec {
    let (definition, placeholder) = match segment.find(':') {
        Some(idx) => (&segment[..idx], segment[idx + 1..].trim()),
        None => (segment, ""),
    };

    let mut segs = definition.split('|').map(str::trim);
    let label = segs.next().unwrap_or_default().to_string();
    let meta = parse_meta(segs);

    let field_name = match meta.get("name") {
        Some(MetaValue::Text(name)) if !name.trim().is_empty() => name.trim().to_string(),
        _ => slugify(&label),
    };

    let (kind, choices) = resolve_kind(&meta);

    FieldSpec {
        label,
        field_name,
        kind,
        choices,
        placeholder: placeholder.to_string(),
        meta,
    }
}

fn parse_meta<'a>(segs: impl Iterator<Item = &'a str>) -> BTreeMap<String, MetaValue> {
    let mut meta = BTreeMap::new();
    for seg in segs.filter(|s| !s.is_empty()) {
        match seg.find('=') {
            Some(eq) => {
                let key = seg[..eq].trim().to_lowercase();
                let value = seg[eq + 1..].trim().to_string();
                meta.insert(key, MetaValue::Text(value));
            }
            None => {
                meta.insert(seg.to_lowercase(), MetaValue::Flag(true));
            }
        }
    }
    meta
}

fn resolve_kind(meta: &BTreeMap<String, MetaValue>) -> (FieldKind, Vec<String>) {
    let kind_is = |wanted: &str| {
        matches!(meta.get("type"), Some(MetaValue::Text(t)) if t.eq_ignore_ascii_case(wanted))
    };

    // A bare `choices` flag reads as the single choice "true"; a blank list does not count
    let choices = match meta.get("choices") {
        Some(MetaValue::Text(list)) if !is_blank(Some(list)) => Some(split_list(list, ';')),
        Some(MetaValue::Flag(_)) => Some(vec!["true".to_string()]),
        _ => None,
    };
    if let Some(choices) = choices {
        return (FieldKind::Choices, choices);
    }
    if kind_is("choices") {
        return (FieldKind::Choices, Vec::new());
    }
    if kind_is("input") {
        return (FieldKind::Input, Vec::new());
    }
    (FieldKind::Textarea, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_only() {
        let f = parse_field("Comentario");
        assert_eq!(f.label, "Comentario");
        assert_eq!(f.field_name, "comentario");
        assert_eq!(f.kind, FieldKind::Textarea);
        assert_eq!(f.placeholder, "");
        assert!(f.meta.is_empty());
    }

    #[test]
    fn test_placeholder_splits_on_first_colon() {
        let f = parse_field("Hora:formato hh:mm");
        assert_eq!(f.label, "Hora");
        assert_eq!(f.placeholder, "formato hh:mm");
    }

    #[test]
    fn test_explicit_name_and_flags() {
        let f = parse_field("Número de caso | name = nro_caso | Required | type=INPUT");
        assert_eq!(f.field_name, "nro_caso");
        assert_eq!(f.kind, FieldKind::Input);
        assert_eq!(f.meta.get("required"), Some(&MetaValue::Flag(true)));
        assert_eq!(
            f.meta.get("type"),
            Some(&MetaValue::Text("INPUT".to_string()))
        );
    }

    #[test]
    fn test_empty_meta_value_is_kept() {
        let f = parse_field("Campo|hint=");
        assert_eq!(f.meta.get("hint"), Some(&MetaValue::Text(String::new())));
    }

    #[test]
    fn test_empty_name_falls_back_to_slug() {
        let f = parse_field("Dirección postal|name=");
        assert_eq!(f.field_name, "direccin_postal");
    }

    #[test]
    fn test_type_choices_without_list() {
        let f = parse_field("Estado|type=choices");
        assert_eq!(f.kind, FieldKind::Choices);
        assert!(f.choices.is_empty());
    }

    #[test]
    fn test_choices_win_over_type_input() {
        let f = parse_field("Estado|type=input|choices=a; ;b");
        assert_eq!(f.kind, FieldKind::Choices);
        assert_eq!(f.choices, vec!["a", "b"]);
    }

    #[test]
    fn test_blank_choices_do_not_force_choices() {
        let f = parse_field("Campo|type=input|choices=:ph");
        assert_eq!(f.kind, FieldKind::Input);
        assert!(f.choices.is_empty());
        assert_eq!(f.placeholder, "ph");

        let f = parse_field("Campo|choices=  ");
        assert_eq!(f.kind, FieldKind::Textarea);

        let f = parse_field("Campo|type=choices|choices=");
        assert_eq!(f.kind, FieldKind::Choices);
        assert!(f.choices.is_empty());
    }

    #[test]
    fn test_bare_choices_flag() {
        let f = parse_field("Acepta|choices");
        assert_eq!(f.kind, FieldKind::Choices);
        assert_eq!(f.choices, vec!["true"]);
    }

    #[test]
    fn test_empty_label() {
        let f = parse_field("|name=oculto:algo");
        assert_eq!(f.label, "");
        assert_eq!(f.field_name, "oculto");
        assert_eq!(f.placeholder, "algo");
    }
}
