//! # places-adapter-storage-json
//!
//! Flat-file persistence adapter: the whole place collection lives in one
//! pretty-printed JSON array on local disk.
//!
//! ## Responsibilities
//! - Implement the `PlaceStore` port trait defined in `places-app::ports::storage`
//! - Treat a missing file as an empty collection
//! - Reject unparsable or mis-shaped files instead of silently starting over
//! - Replace the file atomically (write to a sibling temp file, then rename)
//!
//! ## Dependency rule
//! Depends on `places-app` (for port traits) and `places-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::{Config, JsonFileStore};
