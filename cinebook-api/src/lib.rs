pub mod admin;
pub mod app_config;
pub mod error;
pub mod request;
pub mod routes;
pub mod seed;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes())
        .merge(admin::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
