//! Application configuration management.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::AppResult;
use crate::types::Currency;

/// Dominican peso bills a drawer accepts unless configured otherwise.
pub const DEFAULT_LOCAL_DENOMINATIONS: [u32; 6] = [2000, 1000, 500, 200, 100, 50];

/// US dollar bills a drawer accepts unless configured otherwise.
pub const DEFAULT_FOREIGN_DENOMINATIONS: [u32; 6] = [100, 50, 20, 10, 5, 1];

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Cash drawer business settings.
    #[serde(default)]
    pub drawer: DrawerConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Apply pending migrations when the server starts.
    #[serde(default)]
    pub run_migrations: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Cash drawer settings: the zone that defines the operational day, the
/// float left in the drawer, and the accepted denominations.
#[derive(Debug, Clone, Deserialize)]
pub struct DrawerConfig {
    /// IANA time zone the operational day is computed in.
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    /// Currency the drawer is reconciled in.
    #[serde(default = "default_local_currency")]
    pub local_currency: Currency,
    /// Currency of the optional foreign tally.
    #[serde(default = "default_foreign_currency")]
    pub foreign_currency: Currency,
    /// Float left in the drawer at the start of every operational day.
    #[serde(default = "default_base_amount")]
    pub base_amount: Decimal,
    /// Exchange rate suggested when no closing has recorded one yet.
    #[serde(default = "default_exchange_rate")]
    pub default_exchange_rate: Decimal,
    /// Accepted local bill denominations.
    #[serde(default = "default_local_denominations")]
    pub local_denominations: Vec<u32>,
    /// Accepted foreign bill denominations.
    #[serde(default = "default_foreign_denominations")]
    pub foreign_denominations: Vec<u32>,
    /// Maximum number of closings returned by the history listing.
    #[serde(default = "default_history_limit")]
    pub history_limit: u64,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            local_currency: default_local_currency(),
            foreign_currency: default_foreign_currency(),
            base_amount: default_base_amount(),
            default_exchange_rate: default_exchange_rate(),
            local_denominations: default_local_denominations(),
            foreign_denominations: default_foreign_denominations(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_timezone() -> Tz {
    chrono_tz::America::Santo_Domingo
}

fn default_local_currency() -> Currency {
    Currency::Dop
}

fn default_foreign_currency() -> Currency {
    Currency::Usd
}

fn default_base_amount() -> Decimal {
    Decimal::new(4000, 0)
}

fn default_exchange_rate() -> Decimal {
    Decimal::new(5850, 2) // 58.50
}

fn default_local_denominations() -> Vec<u32> {
    DEFAULT_LOCAL_DENOMINATIONS.to_vec()
}

fn default_foreign_denominations() -> Vec<u32> {
    DEFAULT_FOREIGN_DENOMINATIONS.to_vec()
}

fn default_history_limit() -> u64 {
    100
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` if a source cannot be read or the
    /// merged settings do not deserialize.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("CASHBOX")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("drawer.local_denominations")
                    .with_list_parse_key("drawer.foreign_denominations")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
