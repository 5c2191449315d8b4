//! # places-domain
//!
//! Pure domain model for the places service.
//!
//! ## Responsibilities
//! - Foundational types: the place identifier and error conventions
//! - Define **Places** (open-ended JSON records identified by an `id` field)
//! - Define **Patches** (field sets shallow-merged into a place)
//! - Define the **Collection** (ordered sequence of places persisted as a whole)
//! - Contain the append / filter-out / field-merge logic applied per request
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod collection;
pub mod place;
