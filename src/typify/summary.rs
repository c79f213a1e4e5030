use serde::{Deserialize, Serialize};

use crate::executive::Executive;
use crate::prefill::DataMap;
use crate::text::{is_blank, title_label};

/// A rendered control and its current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveField {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl ActiveField {
    pub fn new(name: &str, label: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    fn display_label(&self) -> String {
        if self.label.is_empty() {
            title_label(&self.name)
        } else {
            self.label.clone()
        }
    }
}

fn is_observation(label: &str) -> bool {
    label.to_lowercase().contains("observacion")
}

/// Clipboard text: one `LABEL: value` line per filled field. Observation
/// fields put their value on the next line.
pub fn summary_text(fields: &[ActiveField]) -> String {
    fields
        .iter()
        .filter(|f| !is_blank(Some(&f.value)))
        .map(|f| {
            let label = f.display_label();
            if is_observation(&label) {
                format!("{}:\n{}", label.to_uppercase(), f.value)
            } else {
                format!("{}: {}", label.to_uppercase(), f.value)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Flat data object sent to forms and history, enriched with the executive.
pub fn collect_data(fields: &[ActiveField], executive: Option<&Executive>) -> DataMap {
    let mut data: DataMap = fields
        .iter()
        .map(|f| (f.name.clone(), f.value.clone()))
        .collect();

    if let Some(exec) = executive {
        if !is_blank(Some(&exec.cedula)) {
            data.insert("ejecutivo_cedula".to_string(), exec.cedula.clone());
        }
        if !is_blank(Some(&exec.name)) {
            data.insert("ejecutivo_nombre".to_string(), exec.name.clone());
        }
        if !is_blank(Some(&exec.cedula)) && is_blank(data.get("ejecutivo")) {
            data.insert("ejecutivo".to_string(), exec.cedula.clone());
        }
    }
    data
}
