use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tipifica::api::{routes::create_router, state::AppState};
use tipifica::catalog::{DirTableSource, HttpTableSource, TableSource};
use tipifica::config::Config;
use tipifica::storage::{FallbackKvStore, KvStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load environment
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    let source: Arc<dyn TableSource> = match &config.data_url {
        Some(url) => {
            tracing::info!("Reading workbooks from {}", url);
            Arc::new(HttpTableSource::new(url.clone()))
        }
        None => {
            tracing::info!("Reading workbooks from {:?}", config.data_dir);
            Arc::new(DirTableSource::new(config.data_dir.clone()))
        }
    };

    if let Some(parent) = config.db_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::warn!("Cannot create {:?}: {}", parent, e);
        }
    }
    let kv = FallbackKvStore::open(&config.db_path);
    let persistent = kv.is_persistent();
    let store: Arc<dyn KvStore> = Arc::new(kv);

    // Create application state
    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(config, source, store, persistent));
    state.reload_catalog().await;

    // Build router
    let app = create_router(state);

    // Start server
    tracing::info!("Tipifica starting on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
