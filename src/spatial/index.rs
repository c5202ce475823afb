//! Collision checks and nearest-position search
//!
//! Stateless geometry service parameterized by the map bounds. Grid overlap
//! uses half-open cell rectangles, so footprints that merely share an edge
//! do not collide. Pixel overlap is a separate, looser center-distance test
//! for entities that move continuously rather than cell by cell.

use serde::{Deserialize, Serialize};

use crate::spatial::geometry::{GridPosition, GridSize, MapBounds, PixelPosition, PixelRect};
use crate::spatial::visualization::CollisionVisualization;
use crate::store::object::{ObjectId, PlacedObject};

/// Outcome of probing a grid rectangle against the placed collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionResult {
    /// Whether the rectangle overlaps at least one placed object
    pub has_collision: bool,
    /// Ids of every placed object the rectangle overlaps
    pub colliding: Vec<ObjectId>,
    /// Whether the rectangle extends past the map bounds
    pub out_of_bounds: bool,
    /// True when the rectangle neither collides nor leaves the map
    pub valid_position: bool,
}

/// Stateless grid geometry and collision service
#[derive(Debug, Clone, Copy)]
pub struct GridIndex {
    bounds: MapBounds,
}

impl GridIndex {
    /// Create an index over the given map bounds
    pub const fn new(bounds: MapBounds) -> Self {
        Self { bounds }
    }

    /// Map bounds this index validates against
    pub const fn bounds(&self) -> MapBounds {
        self.bounds
    }

    /// Grid cell containing the pixel position
    pub fn pixel_to_grid(&self, pixel: PixelPosition) -> GridPosition {
        GridPosition {
            grid_x: (pixel.x / self.bounds.tile_size()).floor() as i32,
            grid_y: (pixel.y / self.bounds.tile_size()).floor() as i32,
        }
    }

    /// Pixel position of the cell's top-left corner
    pub const fn grid_to_pixel(&self, grid: GridPosition) -> PixelPosition {
        PixelPosition {
            x: grid.grid_x as f64 * self.bounds.tile_size(),
            y: grid.grid_y as f64 * self.bounds.tile_size(),
        }
    }

    /// Snap a pixel position to the top-left corner of its grid cell
    ///
    /// Idempotent: snapping an already snapped position is a no-op.
    pub fn snap_to_grid(&self, pixel: PixelPosition) -> PixelPosition {
        self.grid_to_pixel(self.pixel_to_grid(pixel))
    }

    /// Whether the footprint lies entirely inside the map
    pub const fn is_within_bounds(&self, position: GridPosition, size: GridSize) -> bool {
        position.grid_x >= 0
            && position.grid_y >= 0
            && position.grid_x + size.grid_width <= self.bounds.grid_width()
            && position.grid_y + size.grid_height <= self.bounds.grid_height()
    }

    /// Probe a grid rectangle against the placed collection
    ///
    /// `exclude` lets an object ignore its own footprint while being moved.
    pub fn check_collision(
        &self,
        position: GridPosition,
        size: GridSize,
        objects: &[PlacedObject],
        exclude: Option<&ObjectId>,
    ) -> CollisionResult {
        let out_of_bounds = !self.is_within_bounds(position, size);

        let mut colliding = Vec::new();
        for object in objects {
            if exclude == Some(&object.id) {
                continue;
            }
            if grid_rectangles_overlap(position, size, object.grid_position, object.grid_size) {
                colliding.push(object.id.clone());
            }
        }

        let has_collision = !colliding.is_empty();
        CollisionResult {
            has_collision,
            valid_position: !has_collision && !out_of_bounds,
            colliding,
            out_of_bounds,
        }
    }

    /// Find the closest valid cell to `target` for the given footprint
    ///
    /// Tries the target itself first, then scans expanding square rings at
    /// Chebyshev distance `1..=max_search_radius`. Within a ring only the
    /// perimeter cells are tested, in row-major order over the deltas, and
    /// the first valid cell wins. The result therefore has minimal Chebyshev
    /// distance, while ties at the same distance resolve by scan order
    /// rather than Euclidean distance.
    pub fn find_nearest_valid_position(
        &self,
        target: GridPosition,
        size: GridSize,
        objects: &[PlacedObject],
        max_search_radius: i32,
    ) -> Option<GridPosition> {
        if self
            .check_collision(target, size, objects, None)
            .valid_position
        {
            return Some(target);
        }

        for radius in 1..=max_search_radius {
            for dx in -radius..=radius {
                for dy in -radius..=radius {
                    // Only perimeter cells; interior cells were covered by smaller rings
                    if dx.abs() != radius && dy.abs() != radius {
                        continue;
                    }
                    let candidate = target.offset(dx, dy);
                    if self
                        .check_collision(candidate, size, objects, None)
                        .valid_position
                    {
                        return Some(candidate);
                    }
                }
            }
        }

        None
    }

    /// Occupancy view of the placed collection for external renderers
    pub fn collision_visualization(&self, objects: &[PlacedObject]) -> CollisionVisualization {
        CollisionVisualization::capture(self.bounds, objects)
    }

    /// Whether a pixel rectangle overlaps any placed object's visual bounds
    ///
    /// Operates on pixel positions and sizes rather than grid cells, so it
    /// can reject positions that pass a coarse grid check but still visually
    /// overlap.
    pub fn has_pixel_overlap(
        &self,
        rect: PixelRect,
        objects: &[PlacedObject],
        exclude: Option<&ObjectId>,
    ) -> bool {
        objects
            .iter()
            .filter(|object| exclude != Some(&object.id))
            .any(|object| pixel_rects_overlap(rect, object.pixel_rect()))
    }
}

/// Half-open AABB overlap test on grid rectangles
///
/// Footprints that only touch along an edge or corner do not overlap.
pub const fn grid_rectangles_overlap(
    pos_a: GridPosition,
    size_a: GridSize,
    pos_b: GridPosition,
    size_b: GridSize,
) -> bool {
    !(pos_a.grid_x >= pos_b.grid_x + size_b.grid_width
        || pos_a.grid_x + size_a.grid_width <= pos_b.grid_x
        || pos_a.grid_y >= pos_b.grid_y + size_b.grid_height
        || pos_a.grid_y + size_a.grid_height <= pos_b.grid_y)
}

/// Center-distance AABB overlap test in pixel space
///
/// Strict inequalities: rectangles that exactly share an edge do not count
/// as overlapping.
pub const fn pixel_rects_overlap(a: PixelRect, b: PixelRect) -> bool {
    let vx = a.center_x() - b.center_x();
    let vy = a.center_y() - b.center_y();
    let combined_half_widths = (a.width + b.width) / 2.0;
    let combined_half_heights = (a.height + b.height) / 2.0;

    vx.abs() < combined_half_widths && vy.abs() < combined_half_heights
}

/// Enumerate every grid cell a footprint covers, column-major from its anchor
pub fn occupied_cells(position: GridPosition, size: GridSize) -> Vec<GridPosition> {
    let mut cells =
        Vec::with_capacity((size.grid_width.max(0) as usize) * (size.grid_height.max(0) as usize));
    for x in position.grid_x..position.grid_x + size.grid_width {
        for y in position.grid_y..position.grid_y + size.grid_height {
            cells.push(GridPosition::new(x, y));
        }
    }
    cells
}
