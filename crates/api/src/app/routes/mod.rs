use axum::{Router, routing::post};

pub mod list_entries;
pub mod system;

/// Router for all principal-scoped endpoints (mounted under `/api/catalog`).
pub fn router() -> Router {
    Router::new()
        .route("/listentries", post(list_entries::search))
        .route("/listentries/move", post(list_entries::move_entries))
        .route("/listentries/delete", post(list_entries::delete))
        .route("/listentrylinks", post(list_entries::create_links))
        .route("/listentrylinks/bulkcreate", post(list_entries::bulk_create_links))
        .route("/listentrylinks/delete", post(list_entries::delete_links))
        .route("/whoami", axum::routing::get(system::whoami))
}
