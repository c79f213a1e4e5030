use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::{FormMappingRecord, FormTarget, FormsMapping, OptionRecord};
use crate::prefill::{build_prefill_url, fallback_url, form_response_url, DataMap};

/// A prefilled form ready to be opened in its own window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedForm {
    pub form_key: String,
    pub url: String,
    pub window_name: String,
}

/// Forms to open for the send action. The selected option narrows the
/// targets to its own form when it names one.
pub fn plan_dispatch(
    mapping: &FormsMapping,
    options: &[OptionRecord],
    selected_option: Option<&str>,
    data: &DataMap,
    now_millis: i64,
) -> Vec<PreparedForm> {
    let option_form = selected_option
        .and_then(|key| options.iter().find(|o| o.option_key == key))
        .map(|o| o.form_key.trim())
        .filter(|k| !k.is_empty());

    let target_keys: Vec<&str> = match option_form {
        Some(key) => vec![key],
        None => mapping.forms.iter().map(|f| f.form_key.as_str()).collect(),
    };

    let mut prepared = Vec::new();
    for (idx, key) in target_keys.into_iter().enumerate() {
        let Some(form) = mapping.form(key) else {
            tracing::warn!("Form key not found: {}", key);
            continue;
        };
        let rows = mapping.rows_for(&form.form_key);
        let url = build_prefill_url(&form.form_url, &rows, data);
        tracing::debug!(
            "Prepared form {} with {} mapping rows",
            form.form_key,
            rows.len()
        );
        prepared.push(PreparedForm {
            form_key: form.form_key.clone(),
            window_name: format!("prefill_{}_{}_{}", safe_key(&form.form_key), idx, now_millis),
            url,
        });
    }
    prepared
}

fn safe_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// How the copy action reaches the hidden form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HiddenSubmission {
    /// POST `inputs` to `action_url` without showing anything
    Silent {
        form_key: String,
        action_url: String,
        inputs: BTreeMap<String, String>,
    },
    /// Open the prefilled form
    Window { form_key: String, url: String },
    /// No entry mapping: open the form with `cc` and `body` parameters
    Fallback { form_key: String, url: String },
}

/// Plan the background submission for the copy action. `None` when no
/// hidden form is configured.
pub fn plan_hidden_submission(
    hidden: &FormsMapping,
    form_key: Option<&str>,
    silent: bool,
    data: &DataMap,
) -> Option<HiddenSubmission> {
    let target = resolve_hidden_target(&hidden.forms, form_key)?;
    let records: Vec<&FormMappingRecord> = hidden.records_for(&target.form_key).collect();

    if records.is_empty() {
        return Some(HiddenSubmission::Fallback {
            form_key: target.form_key.clone(),
            url: fallback_url(&target.form_url, data),
        });
    }

    if silent {
        return Some(HiddenSubmission::Silent {
            form_key: target.form_key.clone(),
            action_url: form_response_url(&target.form_url),
            inputs: silent_inputs(&records, data),
        });
    }

    let rows: Vec<_> = records.iter().map(|r| r.to_mapping_row()).collect();
    Some(HiddenSubmission::Window {
        form_key: target.form_key.clone(),
        url: build_prefill_url(&target.form_url, &rows, data),
    })
}

fn resolve_hidden_target<'a>(forms: &'a [FormTarget], form_key: Option<&str>) -> Option<&'a FormTarget> {
    if let Some(key) = form_key {
        if let Some(form) = forms.iter().find(|f| f.form_key == key) {
            return Some(form);
        }
    }
    forms
        .iter()
        .find(|f| f.form_key.eq_ignore_ascii_case("ejecutivo"))
        .or_else(|| forms.first())
}

/// Entry id to raw value: the data value when the field exists, else the
/// row's fixed value.
pub fn silent_inputs(records: &[&FormMappingRecord], data: &DataMap) -> BTreeMap<String, String> {
    let mut inputs = BTreeMap::new();
    for record in records {
        let entry_id = record.form_entry_id.trim();
        if entry_id.is_empty() {
            continue;
        }
        let field_key = record.field_name.trim();
        let value = match data.get(field_key) {
            Some(v) if !field_key.is_empty() => v.clone(),
            _ => record.value.clone(),
        };
        inputs.insert(entry_id.to_string(), value);
    }
    inputs
}
