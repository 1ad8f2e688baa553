//! Router assembly.
//!
//! Everything except `/health` sits behind the bearer token middleware.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{handlers, middleware, state::AppState};

/// Build the application router with all routes and layers applied.
pub fn router(state: AppState) -> Router {
    let authenticated_routes = Router::new()
        // Account routes
        .route(
            "/accounts",
            post(handlers::accounts::create_account).get(handlers::accounts::list_accounts),
        )
        .route("/accounts/{id}", get(handlers::accounts::get_account))
        .route(
            "/accounts/{id}/entries",
            get(handlers::accounts::list_entries),
        )
        // Transfer routes
        .route("/transfers", post(handlers::transfers::create_transfer))
        .route("/transfers/{id}", get(handlers::transfers::get_transfer))
        // Only matched routes run the middleware, so unknown paths still 404
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(authenticated_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
