//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides: API_URL, SITE_URL, APP_ENV, BIND_ADDRESS)
//!     → loader.rs (normalize base URLs)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → injected by reference into relay, resolver and client
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no ambient global reads afterwards
//! - All fields have defaults so the service runs with no config at all
//! - Environment variables win over the file, matching how the deployment
//!   platform feeds settings in
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{from_env, load_config, ConfigError};
pub use schema::RelayConfig;
