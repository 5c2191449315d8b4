//! # places-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API** over the place collection
//!   (`/places`, `/places/{id}`, plus a welcome payload at `/`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into JSON responses carrying a
//!   `message` field and the matching status code
//! - Attach permissive cross-origin headers to every response
//! - Serve a server-rendered **HTML dashboard** under `/dashboard`
//!   (askama templates, POST-redirect-GET forms)
//!
//! ## Dependency rule
//! Depends on `places-app` (for port traits and services) and `places-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;
