//! Top-level segmentation of a field template.
//!
//! Fields are separated by `;`, except inside a `choices=` value: once the
//! scanner sees `choices=` (any case) it copies characters verbatim until the
//! next `:`, which ends the field definition.

const CHOICES_MARKER: &[u8] = b"choices=";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InChoices,
}

/// Split a template into trimmed, non-empty raw field segments.
pub fn split_fields(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut buf = String::new();
    let mut state = ScanState::Normal;
    let mut i = 0;

    while i < text.len() {
        if state == ScanState::Normal && starts_with_marker(&bytes[i..]) {
            buf.push_str(&text[i..i + CHOICES_MARKER.len()]);
            i += CHOICES_MARKER.len();
            state = ScanState::InChoices;
            continue;
        }

        let Some(ch) = text[i..].chars().next() else {
            break;
        };
        i += ch.len_utf8();

        match state {
            ScanState::InChoices => {
                buf.push(ch);
                if ch == ':' {
                    state = ScanState::Normal;
                }
            }
            ScanState::Normal if ch == ';' => push_segment(&mut parts, &mut buf),
            ScanState::Normal => buf.push(ch),
        }
    }

    push_segment(&mut parts, &mut buf);
    parts
}

fn starts_with_marker(rest: &[u8]) -> bool {
    rest.len() >= CHOICES_MARKER.len()
        && rest[..CHOICES_MARKER.len()].eq_ignore_ascii_case(CHOICES_MARKER)
}

fn push_segment(parts: &mut Vec<String>, buf: &mut String) {
    let trimmed = buf.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
    buf.clear();
}
