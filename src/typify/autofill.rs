use std::collections::BTreeMap;

use crate::catalog::{CaseItem, FixedFieldDef};
use crate::text::{is_blank, split_list};

/// Keys tried for fields flagged `auto_fill` after their own name.
const FALLBACK_KEYS: [&str; 12] = [
    "c", "d", "e", "f", "telefonos", "telefono", "motivo", "proceso", "sondeo", "nombre", "rut", "id",
];

/// Values for the fixed fields that are configured to auto-fill from a case.
/// Fields without `field_sources` and without `auto_fill` are left out.
pub fn autofill_fixed_fields(defs: &[FixedFieldDef], item: &CaseItem) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();

    for def in defs {
        let sources = split_list(&def.field_sources, ';');
        if sources.is_empty() && !def.auto_fill {
            continue;
        }

        let mut candidates = sources;
        if def.auto_fill || candidates.is_empty() {
            candidates.push(def.field_name.clone());
            for key in FALLBACK_KEYS {
                if !candidates.iter().any(|c| c == key) {
                    candidates.push(key.to_string());
                }
            }
        }

        if let Some(value) = candidates.iter().find_map(|c| lookup(item, c)) {
            out.insert(def.field_name.clone(), value.to_string());
        }
    }
    out
}

fn lookup<'a>(item: &'a CaseItem, key: &str) -> Option<&'a str> {
    [key.to_string(), key.to_lowercase(), key.to_uppercase()]
        .iter()
        .find_map(|k| item.fields.get(k).filter(|v| !is_blank(Some(v))))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Record;

    fn item(pairs: &[(&str, &str)]) -> CaseItem {
        let mut rec: Record = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        rec.entry("id".to_string()).or_insert_with(|| "C-1".to_string());
        CaseItem::from_record(rec).unwrap()
    }

    fn def(name: &str, sources: &str, auto_fill: bool) -> FixedFieldDef {
        FixedFieldDef {
            field_name: name.to_string(),
            field_sources: sources.to_string(),
            auto_fill,
            ..Default::default()
        }
    }

    #[test]
    fn test_unconfigured_fields_are_skipped() {
        let values = autofill_fixed_fields(&[def("motivo", "", false)], &item(&[("motivo", "x")]));
        assert!(values.is_empty());
    }

    #[test]
    fn test_sources_in_order() {
        let values = autofill_fixed_fields(
            &[def("contacto", "telefono_movil; telefono", false)],
            &item(&[("telefono", "222"), ("telefono_movil", " ")]),
        );
        assert_eq!(values["contacto"], "222");
    }

    #[test]
    fn test_auto_fill_uses_own_name_then_fallbacks() {
        let defs = [def("proceso", "", true), def("ref", "", true)];
        let values = autofill_fixed_fields(&defs, &item(&[("proceso", "Venta")]));
        assert_eq!(values["proceso"], "Venta");
        // "ref" is absent from the case; "proceso" comes before "id" in the fallbacks
        assert_eq!(values["ref"], "Venta");

        let values = autofill_fixed_fields(&defs[1..], &item(&[]));
        assert_eq!(values["ref"], "C-1");
    }

    #[test]
    fn test_sources_without_auto_fill_do_not_use_fallbacks() {
        let values = autofill_fixed_fields(
            &[def("contacto", "inexistente", false)],
            &item(&[("nombre", "Ana")]),
        );
        assert!(values.is_empty());
    }
}
