use serde::{Deserialize, Serialize};

use super::HistoryEntry;
use crate::catalog::Record;
use crate::text::{is_blank, normalize_key, split_list};

pub const CONTAINER_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaItem {
    /// One or more `;`-separated aliases
    pub field_name: String,
    pub label: String,
}

/// Which data fields each of the four history containers shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySchema {
    containers: [Vec<SchemaItem>; CONTAINER_COUNT],
}

impl HistorySchema {
    /// Build from `container, field_name, label` rows.
    pub fn from_records(records: &[Record]) -> Self {
        let mut schema = Self::default();
        for record in records {
            let field_cell = record.get("field_name").map(String::as_str).unwrap_or("");
            if is_blank(Some(field_cell)) {
                continue;
            }
            let container = record
                .get("container")
                .and_then(|c| c.trim().parse::<f64>().ok())
                .filter(|n| *n != 0.0 && n.is_finite())
                .map(|n| (n as i64).clamp(1, CONTAINER_COUNT as i64) as usize)
                .unwrap_or(1);
            let label = record
                .get("label")
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty());

            for name in split_list(field_cell, ';') {
                schema.containers[container - 1].push(SchemaItem {
                    label: label.clone().unwrap_or_else(|| name.clone()),
                    field_name: name,
                });
            }
        }
        schema
    }

    /// Items of container `idx` (1-based).
    pub fn items(&self, idx: usize) -> &[SchemaItem] {
        match idx {
            1..=CONTAINER_COUNT => &self.containers[idx - 1],
            _ => &[],
        }
    }

    /// Text block for container `idx` of an entry.
    pub fn format_container(&self, idx: usize, entry: &HistoryEntry) -> String {
        let items = self.items(idx);
        if items.is_empty() {
            if idx != CONTAINER_COUNT {
                return String::new();
            }
            return entry
                .data
                .iter()
                .filter(|(k, _)| k.as_str() != "datetime")
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect::<Vec<_>>()
                .join("\n");
        }

        items
            .iter()
            .map(|item| {
                let value = field_value(entry, &item.field_name);
                if is_blank(Some(&value)) {
                    format!("{}: ", item.label)
                } else {
                    format!("{}: {}", item.label, value)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Value of the first alias found in the entry data. Keys are compared
/// loosely first, then exactly, lowercased and uppercased.
pub fn field_value(entry: &HistoryEntry, field_name: &str) -> String {
    for candidate in split_list(field_name, ';') {
        let norm = normalize_key(&candidate);
        if !norm.is_empty() {
            // First original key wins when several normalise alike
            if let Some(v) = entry
                .data
                .iter()
                .find(|(k, _)| normalize_key(k) == norm)
                .map(|(_, v)| v)
            {
                return v.clone();
            }
        }
        for key in [
            candidate.clone(),
            candidate.to_lowercase(),
            candidate.to_uppercase(),
        ] {
            if let Some(v) = entry.data.get(&key) {
                return v.clone();
            }
        }
    }
    String::new()
}
