//! Cashbox API Server
//!
//! Main entry point for the cash drawer closing service.

use std::sync::Arc;

use cashbox_api::{AppState, create_router};
use cashbox_core::SystemClock;
use cashbox_db::{connect_with, migration::Migrator};
use cashbox_shared::AppConfig;
use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cashbox=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    let db = connect_with(&config.database).await?;
    info!("Connected to database");

    if config.database.run_migrations {
        Migrator::up(&db, None).await?;
        info!("Migrations applied");
    }

    let drawer = config.drawer;
    info!(
        timezone = %drawer.timezone,
        base_amount = %drawer.base_amount,
        local_currency = %drawer.local_currency,
        foreign_currency = %drawer.foreign_currency,
        "Drawer configured"
    );

    let state = AppState::new(db, Arc::new(SystemClock), drawer);
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
