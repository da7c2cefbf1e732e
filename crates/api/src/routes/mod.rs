//! API routes

pub mod subdomains;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the subdomain API routes
pub fn create_router(state: AppState) -> Router {
    let subdomain_routes = Router::new()
        .route("/subdomains/check", post(subdomains::check_subdomain))
        .route("/subdomains/suggest", post(subdomains::suggest_subdomain))
        .route("/subdomains/alternatives/:base", get(subdomains::list_alternatives))
        .route("/subdomains/current", get(subdomains::current_subdomain));

    Router::new()
        .nest("/api/v1", subdomain_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
