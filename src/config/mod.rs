//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (after optional .env)
//!     → loader.rs (read & parse variables)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults so an empty environment still boots
//! - Validation separates syntactic (parse) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, ConfigError};
pub use schema::{
    AppConfig, CorsConfig, ObservabilityConfig, RateLimitConfig, SecurityConfig, ServerConfig,
    StaticFilesConfig,
};
