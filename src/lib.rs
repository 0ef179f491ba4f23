//! Items API service library.

pub mod config;
pub mod http;
pub mod items;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::AppConfig;
pub use http::HttpServer;
pub use items::{Item, ItemStore};
pub use lifecycle::Shutdown;
