//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (add request ID)
//!     → items.rs / system.rs (handlers)
//!     → error.rs (failure rendering)
//!     → Send to client
//! ```

pub mod error;
pub mod items;
pub mod request;
pub mod server;
pub mod system;

pub use error::{ApiError, ApiResult};
pub use request::{RequestId, RequestIdExt, RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
