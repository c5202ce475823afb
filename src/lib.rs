//! Collision-safe placement of rectangular objects on a fixed tile grid
//!
//! Objects occupy whole grid cells, never overlap each other, and never
//! extend past the map bounds. Every committed edit is captured as an
//! immutable snapshot in a bounded history, so an editor can undo and redo
//! arbitrary placement sequences.

#![forbid(unsafe_code)]

/// Map defaults and safety limits
pub mod config;
/// Editing facade pairing the object store with undo history
pub mod editor;
/// Error types for placement operations
pub mod error;
/// Bounded snapshot history with linear undo/redo
pub mod history;
/// Grid geometry, collision testing, and position search
pub mod spatial;
/// Typed object model and the authoritative placed-object collection
pub mod store;

pub use editor::Editor;
pub use error::{PlacementError, Result};
