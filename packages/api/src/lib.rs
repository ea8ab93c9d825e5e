use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

/// Builds the full router over the given state.
pub fn app(state: state::AppState) -> Router {
    // ToDo: restrict origins once the web client has a fixed domain
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::auth::routes())
        .merge(routes::games::routes())
        .merge(routes::invites::routes())
        .layer(cors)
        .with_state(state)
}
