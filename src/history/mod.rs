//! Local history of copied typifications.

pub mod schema;

use anyhow::{anyhow, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

pub use schema::{field_value, HistorySchema, SchemaItem, CONTAINER_COUNT};

use crate::prefill::DataMap;
use crate::storage::{get_as, set_as, KvStore};

pub const STORAGE_KEY: &str = "historico_entries";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub datetime: String,
    #[serde(default)]
    pub data: DataMap,
    #[serde(default)]
    pub raw_text: String,
}

impl HistoryEntry {
    pub fn new(data: DataMap, raw_text: String, datetime: Option<String>) -> Self {
        let now = Utc::now();
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self {
            id: format!("h_{}_{}", now.timestamp_millis(), &suffix[..6]),
            datetime: datetime.unwrap_or_else(|| now.to_rfc3339()),
            data,
            raw_text,
        }
    }
}

/// History entries stored newest first under [`STORAGE_KEY`].
pub struct HistoryLog {
    store: Arc<dyn KvStore>,
    /// Held across every read-modify-write of the stored list
    write_lock: Mutex<()>,
}

impl HistoryLog {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn entries(&self) -> Result<Vec<HistoryEntry>> {
        Ok(get_as(self.store.as_ref(), STORAGE_KEY)?.unwrap_or_default())
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        set_as(self.store.as_ref(), STORAGE_KEY, &entries)
    }

    pub fn add(&self, data: DataMap, raw_text: String, datetime: Option<String>) -> Result<HistoryEntry> {
        let entry = HistoryEntry::new(data, raw_text, datetime);
        let _guard = self.write_lock.lock().map_err(|e| anyhow!("Lock error: {}", e))?;
        let mut entries = self.entries()?;
        entries.insert(0, entry.clone());
        self.save(&entries)?;
        tracing::debug!("History entry {} added ({} total)", entry.id, entries.len());
        Ok(entry)
    }

    /// Returns whether an entry was removed.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().map_err(|e| anyhow!("Lock error: {}", e))?;
        let mut entries = self.entries()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.save(&entries)?;
        Ok(true)
    }

    pub fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().map_err(|e| anyhow!("Lock error: {}", e))?;
        self.save(&[])
    }

    /// Entries whose raw text, datetime or any formatted container contains `query`.
    pub fn search(&self, query: &str, schema: &HistorySchema) -> Result<Vec<HistoryEntry>> {
        let q = query.trim().to_lowercase();
        let entries = self.entries()?;
        if q.is_empty() {
            return Ok(entries);
        }
        Ok(entries
            .into_iter()
            .filter(|e| {
                e.raw_text.to_lowercase().contains(&q)
                    || e.datetime.to_lowercase().contains(&q)
                    || (1..=CONTAINER_COUNT)
                        .any(|c| schema.format_container(c, e).to_lowercase().contains(&q))
            })
            .collect())
    }
}

/// Plain-text export of every entry.
pub fn export_txt(entries: &[HistoryEntry], schema: &HistorySchema) -> String {
    let mut lines = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        lines.push(format!("=== Entrada {} ===", idx + 1));
        lines.push(format!("ID: {}", entry.id));
        lines.push(format!("Registrado: {}", entry.datetime));
        for c in 1..=CONTAINER_COUNT {
            lines.push(format!("--- Contenedor {} ---", c));
            lines.push(schema.format_container(c, entry));
        }
        lines.push("--- RAW TEXT ---".to_string());
        lines.push(entry.raw_text.clone());
        lines.push("\n".to_string());
    }
    lines.join("\n")
}

/// Tabular export: a header row then one row per entry.
pub fn export_rows(entries: &[HistoryEntry], schema: &HistorySchema) -> Vec<Vec<String>> {
    let mut rows = vec![[
        "id",
        "datetime",
        "rawText",
        "container1",
        "container2",
        "container3",
        "container4",
    ]
    .iter()
    .map(|h| h.to_string())
    .collect::<Vec<_>>()];

    for entry in entries {
        let mut row = vec![
            entry.id.clone(),
            entry.datetime.clone(),
            entry.raw_text.clone(),
        ];
        row.extend((1..=CONTAINER_COUNT).map(|c| schema.format_container(c, entry)));
        rows.push(row);
    }
    rows
}
