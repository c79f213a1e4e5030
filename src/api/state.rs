use std::sync::Arc;
use tokio::sync::RwLock;

use crate::catalog::{Catalog, TableSource};
use crate::config::Config;
use crate::executive::ExecutiveStore;
use crate::history::HistoryLog;
use crate::storage::KvStore;

/// Shared application state
pub struct AppState {
    pub config: Config,

    /// Workbook data, replaced as a whole on reload
    pub catalog: RwLock<Catalog>,

    /// Where workbooks are read from
    pub source: Arc<dyn TableSource>,

    pub store: Arc<dyn KvStore>,
    pub history: HistoryLog,
    pub executive: ExecutiveStore,

    persistent: bool,
}

impl AppState {
    pub fn new(
        config: Config,
        source: Arc<dyn TableSource>,
        store: Arc<dyn KvStore>,
        persistent: bool,
    ) -> Self {
        Self {
            config,
            catalog: RwLock::new(Catalog::default()),
            source,
            history: HistoryLog::new(store.clone()),
            executive: ExecutiveStore::new(store.clone()),
            store,
            persistent,
        }
    }

    /// Load every workbook from the source and swap the catalog.
    pub async fn reload_catalog(&self) {
        let catalog = Catalog::load(self.source.as_ref()).await;
        *self.catalog.write().await = catalog;
    }

    /// Whether stored values survive a restart
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }
}
