//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → rate_limit.rs (per-caller sliding window)
//!     → headers.rs (hardening headers on the response)
//!     → auth.rs (token check, protected routes only)
//!     → Pass to handlers
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject on any security check failure
//! - No trust in client input

pub mod auth;
pub mod headers;
pub mod rate_limit;

pub use auth::UserContext;
pub use rate_limit::RateLimiter;
