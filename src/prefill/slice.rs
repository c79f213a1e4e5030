//! The `start||end` slice operator.
//!
//! Markers are literal strings. A missing start marker means the value is
//! treated as absent; a missing end marker means "to the end".

const SEPARATOR: &str = "||";

/// Parsed slice markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SliceSpec {
    pub start: String,
    pub end: String,
}

impl SliceSpec {
    pub fn parse(spec: &str) -> Self {
        let mut parts = spec.split(SEPARATOR);
        Self {
            start: parts.next().unwrap_or_default().to_string(),
            end: parts.next().unwrap_or_default().to_string(),
        }
    }

    /// Extract the marked substring, trimmed. Empty when the start marker is absent.
    pub fn extract(&self, value: &str) -> String {
        let start_pos = if self.start.is_empty() {
            0
        } else {
            match value.find(&self.start) {
                Some(idx) => idx + self.start.len(),
                None => return String::new(),
            }
        };

        let rest = &value[start_pos..];
        if self.end.is_empty() {
            return rest.trim().to_string();
        }
        match rest.find(&self.end) {
            Some(idx) => rest[..idx].trim().to_string(),
            None => rest.trim().to_string(),
        }
    }
}

/// Apply a raw slice spec to an optional value.
///
/// An absent value yields `""`; a blank spec yields the trimmed value.
pub fn apply_slice(value: Option<&str>, spec: &str) -> String {
    let Some(value) = value else {
        return String::new();
    };
    if spec.trim().is_empty() {
        return value.trim().to_string();
    }
    SliceSpec::parse(spec).extract(value)
}
