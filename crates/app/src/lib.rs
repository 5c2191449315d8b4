//! # places-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** that storage adapters must implement:
//!   - `PlaceStore`: load and save the whole place collection
//! - Define the **driving/inbound port** as a use-case struct:
//!   - `PlaceService`: list, get, add, update, delete
//! - Serialize every load → mutate → save cycle so concurrent mutations
//!   cannot overwrite each other
//!
//! ## Dependency rule
//! Depends on `places-domain` only (plus `tokio::sync` for the write lock).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
