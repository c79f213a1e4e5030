use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

/// Rows of string cells. The first row holds headers when the sheet has any.
pub type Sheet = Vec<Vec<String>>;

/// A workbook exported as JSON: an array of sheets, each an array of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet(&self, idx: usize) -> Option<&Sheet> {
        self.sheets.get(idx)
    }

    /// Decode the JSON export. Cells may be strings, numbers, booleans or null.
    pub fn from_json(raw: &str) -> Result<Self> {
        let doc: Vec<Vec<Vec<Value>>> =
            serde_json::from_str(raw).context("workbook must be an array of sheets")?;
        let sheets = doc
            .into_iter()
            .map(|rows| {
                rows.into_iter()
                    .map(|cells| cells.into_iter().map(cell_to_string).collect())
                    .collect()
            })
            .collect();
        Ok(Self { sheets })
    }
}

fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Where workbooks come from.
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Fetch a workbook by name (`data`, `options`, ...). `Ok(None)` when it does not exist.
    async fn fetch_workbook(&self, name: &str) -> Result<Option<Workbook>>;
}

/// Reads `<dir>/<name>.json`.
pub struct DirTableSource {
    dir: PathBuf,
}

impl DirTableSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl TableSource for DirTableSource {
    async fn fetch_workbook(&self, name: &str) -> Result<Option<Workbook>> {
        let path = self.dir.join(format!("{}.json", name));
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }
        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Workbook::from_json(&raw).map(Some)
    }
}

/// GETs `<base_url>/<name>.json`.
pub struct HttpTableSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTableSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TableSource for HttpTableSource {
    async fn fetch_workbook(&self, name: &str) -> Result<Option<Workbook>> {
        let url = format!("{}/{}.json", self.base_url, name);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(anyhow!("HTTP {} fetching {}", response.status(), url));
        }

        let raw = response.text().await?;
        Workbook::from_json(&raw).map(Some)
    }
}
