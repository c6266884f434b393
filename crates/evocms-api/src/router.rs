//! Route definitions for the evocms HTTP API.
//!
//! Routes served to visitors go through the session middleware; the
//! health check does not, so probes never create sessions.

use axum::Router;
use axum::middleware as axum_middleware;
use axum::routing::get;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with all routes and the session layer.
pub fn build_router(state: AppState) -> Router {
    let visitor_routes = Router::new()
        .merge(rest_routes())
        .merge(widget_routes())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::session::track_session,
        ));

    Router::new()
        .route("/health", get(handlers::health::health))
        .merge(visitor_routes)
        .with_state(state)
}

/// REST dispatcher: `/api/v1/<module>/<args...>`
fn rest_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1", get(handlers::rest::dispatch))
        .route("/api/v1/", get(handlers::rest::dispatch))
        .route("/api/v1/{*request}", get(handlers::rest::dispatch))
}

/// Rendered widget containers
fn widget_routes() -> Router<AppState> {
    Router::new().route(
        "/{coll_urlname}/containers/{code}",
        get(handlers::widget::render_container),
    )
}
