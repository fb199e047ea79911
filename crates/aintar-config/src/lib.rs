//! # AINTAR Config
//!
//! Configuration types for the AINTAR rules service.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`jwt`]: JWT verification settings
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: bind address and workflow metadata location
//! - [`logging`]: log level, format and optional log directory
//!
//! Call `dotenvy::dotenv()` before loading so a local `.env` file is honoured.
//!
//! # Example
//!
//! ```ignore
//! use aintar_config::{CorsConfig, JwtConfig, LoggingConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! let logging_config = LoggingConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod logging;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;
