//! # Campusgate Config
//!
//! Configuration types for the Campusgate API, loaded from environment
//! variables (a `.env` file is read by the binaries via `dotenvy`):
//!
//! - [`cors`]: `ALLOWED_ORIGINS`
//! - [`database`]: `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`
//! - [`server`]: `HOST`, `PORT`, `METRICS_PORT`, `LOG_LEVEL`, `LOG_DIR`,
//!   `METRICS_ENABLED`
//!
//! # Example
//!
//! ```ignore
//! use campusgate_config::{CorsConfig, DatabaseConfig, ServerConfig};
//!
//! let database = DatabaseConfig::from_env()?;
//! let server = ServerConfig::from_env();
//! let cors = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use server::{ObservabilityConfig, ServerConfig};
