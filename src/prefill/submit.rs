//! URL helpers for submitting to hosted forms without the prefill page.

use url::form_urlencoded;
use url::Url;

use super::DataMap;
use crate::text::is_blank;

const RESPONSE_SEGMENT: &str = "formResponse";

/// Derive the POST endpoint of a hosted form from its public URL.
///
/// `/viewform` and `/edit` endings are swapped for `/formResponse`; a
/// `/forms/<a>/<b>/...` path is cut after `<b>`; otherwise the last segment is
/// replaced. The query string is dropped. Unparseable input comes back as-is.
pub fn form_response_url(form_url: &str) -> String {
    let Ok(mut url) = Url::parse(form_url) else {
        return form_url.to_string();
    };

    let segments: Vec<String> = url.path().split('/').map(str::to_string).collect();
    let last = segments.last().map(|s| s.to_lowercase()).unwrap_or_default();

    let mut new_segments = if last == "viewform" || last == "edit" {
        segments[..segments.len() - 1].to_vec()
    } else if let Some(idx) = segments.iter().position(|s| s == "forms") {
        if segments.len() > idx + 2 {
            segments[..idx + 3].to_vec()
        } else {
            segments[..segments.len() - 1].to_vec()
        }
    } else {
        segments[..segments.len() - 1].to_vec()
    };
    new_segments.push(RESPONSE_SEGMENT.to_string());

    url.set_path(&new_segments.join("/"));
    url.set_query(None);
    url.to_string()
}

/// URL used when a form has no entry mapping: the executive's cedula goes in
/// `cc` and a plain-text dump of the data in `body`.
pub fn fallback_url(form_url: &str, data: &DataMap) -> String {
    let cc = data
        .get("ejecutivo_cedula")
        .filter(|v| !is_blank(Some(v)))
        .or_else(|| data.get("ejecutivo"))
        .cloned()
        .unwrap_or_default();

    let mut lines = Vec::new();
    if let Some(name) = data.get("ejecutivo_nombre").filter(|v| !is_blank(Some(v))) {
        lines.push(format!("Ejecutivo: {}", name));
    }
    if let Some(datetime) = data.get("datetime").filter(|v| !is_blank(Some(v))) {
        lines.push(format!("Fecha y hora: {}", datetime));
    }
    for (key, value) in data {
        if matches!(key.as_str(), "datetime" | "ejecutivo_cedula" | "ejecutivo_nombre") {
            continue;
        }
        if is_blank(Some(value)) {
            continue;
        }
        lines.push(format!("{}: {}", key, value));
    }

    let mut query = form_urlencoded::Serializer::new(String::new());
    if !is_blank(Some(&cc)) {
        query.append_pair("cc", &cc);
    }
    query.append_pair("body", &lines.join("\n"));

    let sep = if form_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", form_url, sep, query.finish())
}
