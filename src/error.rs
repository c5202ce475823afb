//! Error types for placement operations
//!
//! Probe operations (collision checks, position searches, undo/redo) report
//! their outcome as data; errors are reserved for rejected mutations and
//! invalid configuration. Every error leaves the store unchanged.

use std::fmt;

use crate::spatial::geometry::GridPosition;
use crate::store::object::ObjectId;

/// Main error type for all placement operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// Configuration or template parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// No valid cell within the search radius around the requested position
    ///
    /// Occurs when every candidate cell is either occupied or would push the
    /// footprint past the map bounds. The attempted object is never created.
    PlacementExhausted {
        /// Grid cell the placement was aimed at
        target: GridPosition,
        /// Chebyshev radius that was searched
        search_radius: i32,
    },

    /// Moving or resizing the object would collide or leave the map
    MoveBlocked {
        /// Object the update addressed
        id: ObjectId,
        /// Grid cell the rejected rectangle was anchored at
        target: GridPosition,
        /// Whether the rejected rectangle exceeded the map bounds
        out_of_bounds: bool,
        /// Number of placed objects the rejected rectangle overlapped
        colliding: usize,
    },

    /// No stored object carries the given id
    UnknownObject {
        /// The unmatched object id
        id: ObjectId,
    },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::PlacementExhausted {
                target,
                search_radius,
            } => {
                write!(
                    f,
                    "No valid position within radius {search_radius} of cell ({}, {})",
                    target.grid_x, target.grid_y
                )
            }
            Self::MoveBlocked {
                id,
                target,
                out_of_bounds,
                colliding,
            } => {
                write!(
                    f,
                    "Cannot move object '{id}' to cell ({}, {}): ",
                    target.grid_x, target.grid_y
                )?;
                if *out_of_bounds {
                    write!(f, "footprint exceeds map bounds")
                } else {
                    write!(f, "footprint overlaps {colliding} placed object(s)")
                }
            }
            Self::UnknownObject { id } => {
                write!(f, "No placed object with id '{id}'")
            }
        }
    }
}

impl std::error::Error for PlacementError {}

/// Convenience type alias for placement results
pub type Result<T> = std::result::Result<T, PlacementError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PlacementError {
    PlacementError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_blocked_display_distinguishes_bounds_from_collision() {
        let id = ObjectId::from_raw("obj_1_abcdefghi");
        let target = GridPosition::new(3, 5);

        let blocked = PlacementError::MoveBlocked {
            id: id.clone(),
            target,
            out_of_bounds: true,
            colliding: 0,
        };
        assert!(blocked.to_string().contains("exceeds map bounds"));

        let collision = PlacementError::MoveBlocked {
            id,
            target,
            out_of_bounds: false,
            colliding: 2,
        };
        assert!(collision.to_string().contains("overlaps 2 placed object(s)"));
    }

    #[test]
    fn test_invalid_parameter_helper_preserves_inputs() {
        let err = invalid_parameter("tile_size", &0.0, &"must be positive");
        match err {
            PlacementError::InvalidParameter {
                parameter, value, ..
            } => {
                assert_eq!(parameter, "tile_size");
                assert_eq!(value, "0");
            }
            _ => unreachable!("Expected InvalidParameter error type"),
        }
    }
}
