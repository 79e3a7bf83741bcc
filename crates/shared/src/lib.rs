//! Shared types, errors, and configuration for Cashbox.
//!
//! This crate provides common types used across all other crates:
//! - Currency codes and typed IDs
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DatabaseConfig, DrawerConfig, ServerConfig};
pub use error::{AppError, AppResult};
