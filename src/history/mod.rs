//! Bounded snapshot history with linear undo/redo

/// Immutable captures of the placed-object collection
pub mod snapshot;
/// Linear history stack with a movable cursor
pub mod stack;

pub use snapshot::Snapshot;
pub use stack::HistoryManager;
