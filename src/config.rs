use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    /// Directory holding `<workbook>.json` files
    pub data_dir: PathBuf,
    /// When set, workbooks are fetched from `<data_url>/<workbook>.json`
    pub data_url: Option<String>,
    pub db_path: PathBuf,
    /// Form key used for the background submission on copy
    pub form_key: String,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            host: env::var("HOST").unwrap_or(defaults.host),
            data_dir: env::var("TIPIFICA_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            data_url: env::var("TIPIFICA_DATA_URL")
                .ok()
                .filter(|u| !u.trim().is_empty()),
            db_path: env::var("TIPIFICA_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            form_key: env::var("TIPIFICA_FORM_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
                .unwrap_or(defaults.form_key),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8765,
            host: "127.0.0.1".to_string(),
            data_dir: PathBuf::from("./data"),
            data_url: None,
            db_path: default_db_path(),
            form_key: "a".to_string(),
        }
    }
}

/// Standard per-user data directory location
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("com.tipifica.app")
        .join("kv.db")
}
