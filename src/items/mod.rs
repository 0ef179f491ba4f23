//! Item collection domain.
//!
//! # Data Flow
//! ```text
//! Handler receives raw JSON
//!     → validation.rs (normalize or aggregate violations)
//!     → store.rs (list / append / replace_by_id / remove_by_id)
//!     → Item snapshots serialized back to the client
//! ```
//!
//! # Design Decisions
//! - The store owns identifier assignment; callers never supply ids
//! - Validation is a pure function over JSON, independent of HTTP
//! - Insertion order is the only ordering guarantee

pub mod store;
pub mod types;
pub mod validation;

pub use store::ItemStore;
pub use types::{Item, NewItem};
