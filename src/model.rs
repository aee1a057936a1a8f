//! Core data model for dogreport.
//!
//! Walks and walkers as the backend describes them, plus the
//! generic document type for endpoints without a fixed shape.

mod walk;
mod walker;

pub use walk::{Charge, Invoice, ParseWalkIdError, Walk, WalkId};
pub use walker::{Walker, WalkerId};

/// A backend document with no fixed shape (owners, dogs, reviews, ...).
pub type Document = serde_json::Value;
