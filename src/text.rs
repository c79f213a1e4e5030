//! String helpers shared by the template parser, the prefill mapper and the
//! workbook loaders.

use regex::Regex;
use std::sync::OnceLock;

/// A value is blank when it is absent or only whitespace.
pub fn is_blank<S: AsRef<str>>(value: Option<S>) -> bool {
    value.map_or(true, |v| v.as_ref().trim().is_empty())
}

/// Derive a field name from a label: lowercase, whitespace runs become `_`,
/// everything outside `[A-Za-z0-9_-]` is dropped.
pub fn slugify(label: &str) -> String {
    let lowered = label.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_space = false;

    for ch in lowered.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('_');
                in_space = true;
            }
            continue;
        }
        in_space = false;
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            out.push(ch);
        }
    }
    out
}

/// `ejecutivo_cedula` -> `EJECUTIVO CEDULA`
pub fn upper_label(key: &str) -> String {
    key.replace('_', " ").to_uppercase()
}

/// `ejecutivo_cedula` -> `Ejecutivo Cedula`
pub fn title_label(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut prev_word = false;
    for ch in key.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        let is_word = ch.is_ascii_alphanumeric() || ch == '_';
        if is_word && !prev_word {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
        prev_word = is_word;
    }
    out
}

/// Split a cell on `sep`, trimming items and dropping empty ones.
pub fn split_list(cell: &str, sep: char) -> Vec<String> {
    cell.split(sep)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Spreadsheet header normalisation.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Loose key used to compare data keys: lowercase ASCII letters and digits only.
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Cedulas match regardless of whitespace, dots, dashes and case.
pub fn normalize_cedula(cedula: &str) -> String {
    cedula
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.' && *c != '-')
        .collect::<String>()
        .to_lowercase()
}

fn hex6() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex6 pattern"))
}

fn hex3() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{3}$").expect("valid hex3 pattern"))
}

/// Normalise a colour cell to `#rrggbb`; short `#rgb` forms are expanded.
pub fn normalize_hex(input: &str) -> Option<String> {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    let with_hash = if cleaned.starts_with('#') {
        cleaned
    } else {
        format!("#{}", cleaned)
    };

    if hex6().is_match(&with_hash) {
        return Some(with_hash.to_lowercase());
    }
    if hex3().is_match(&with_hash) {
        let expanded: String = with_hash[1..].chars().flat_map(|c| [c, c]).collect();
        return Some(format!("#{}", expanded.to_lowercase()));
    }
    None
}
