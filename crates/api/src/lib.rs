//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for the daily closing workflow
//! - JSON error responses for gate, tally and application errors

pub mod error;
pub mod routes;

use axum::Router;
use cashbox_core::{Clock, TallyRules};
use cashbox_db::ClosingRepository;
use cashbox_shared::DrawerConfig;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Source of the current instant.
    pub clock: Arc<dyn Clock>,
    /// Drawer settings, including the zone that defines the operational day.
    pub drawer: Arc<DrawerConfig>,
}

impl AppState {
    /// Creates the state from its parts.
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>, drawer: DrawerConfig) -> Self {
        Self {
            db: Arc::new(db),
            clock,
            drawer: Arc::new(drawer),
        }
    }

    /// Repository over the shared connection.
    #[must_use]
    pub fn closings(&self) -> ClosingRepository {
        ClosingRepository::new((*self.db).clone())
    }

    /// Denomination rules from the drawer settings.
    #[must_use]
    pub fn tally_rules(&self) -> TallyRules {
        TallyRules::new(
            self.drawer.local_denominations.clone(),
            self.drawer.foreign_denominations.clone(),
        )
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
