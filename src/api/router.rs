use axum::Router;
use axum::extract::Extension;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::*;
use super::protocol::{ENDPOINT_INFO, ENDPOINT_PERSON, ENDPOINT_PERSONS};
use crate::contacts::SharedStore;

/// Builds the full HTTP surface over `store`.
///
/// Unmatched paths answer 404 `{"error": "unknown endpoint"}`.
pub fn build_router(store: SharedStore) -> Router {
    Router::new()
        .route(
            ENDPOINT_PERSONS,
            get(handle_list_contacts).post(handle_create_contact),
        )
        .route(
            ENDPOINT_PERSON,
            get(handle_get_contact)
                .put(handle_update_contact)
                .delete(handle_delete_contact),
        )
        .route(ENDPOINT_INFO, get(handle_info))
        .fallback(handle_unknown_endpoint)
        .layer(Extension(store))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
