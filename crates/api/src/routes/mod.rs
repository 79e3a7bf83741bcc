//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod closings;
pub mod exchange_rate;
pub mod health;
pub mod info;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(info::routes())
        .merge(closings::routes())
        .merge(exchange_rate::routes())
}
