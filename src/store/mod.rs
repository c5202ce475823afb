//! Typed object model and the authoritative placed-object collection
//!
//! This module contains the stateful half of the placement core:
//! - The tagged object model and caller-facing templates
//! - Unique id generation
//! - The collection that owns current state and validates every mutation

/// Authoritative placed-object collection
pub mod collection;
/// Unique id generation for placed objects
pub mod ids;
/// Typed object model, templates, and partial updates
pub mod object;

pub use collection::SpatialObjectStore;
pub use object::{ObjectTemplate, PlacedObject};
