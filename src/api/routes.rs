use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{cases, executive, health, history, prefill, template, typify};
use super::state::AppState;

const ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:8080",
    "http://127.0.0.1:8080",
];

pub fn create_router(state: Arc<AppState>) -> Router {
    // Only local front-ends may call the service
    let cors = CorsLayer::new()
        .allow_origin(
            ALLOWED_ORIGINS
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok())
                .collect::<Vec<_>>(),
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Parsing and prefill helpers
        .route("/template/parse", post(template::parse))
        .route("/prefill/url", post(prefill::prefill_url))
        .route("/prefill/slice", post(prefill::slice))
        // Catalog
        .route("/cases", get(cases::list_cases))
        .route("/cases/:case_id", get(cases::get_case))
        .route("/catalog/reload", post(cases::reload_catalog))
        .route("/options/:option_key/fields", get(cases::get_option_fields))
        // Typification
        .route("/typify/autofill", post(typify::autofill))
        .route("/typify/copy", post(typify::copy))
        .route("/typify/send", post(typify::send))
        // History
        .route(
            "/history",
            get(history::list_history).delete(history::clear_history),
        )
        .route("/history/export.txt", get(history::export_text))
        .route("/history/export", get(history::export_table))
        .route("/history/:entry_id", delete(history::delete_entry))
        // Executive
        .route(
            "/executive",
            get(executive::get_executive)
                .put(executive::save_executive)
                .delete(executive::delete_executive),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
