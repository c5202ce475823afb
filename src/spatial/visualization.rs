//! Read-only occupancy views for renderers
//!
//! Derived entirely from the placed collection; renderers consume these
//! views to highlight occupied cells and must never feed them back into
//! mutations.

use std::collections::HashSet;

use ndarray::Array2;

use crate::spatial::geometry::{GridPosition, MapBounds};
use crate::spatial::index::occupied_cells;
use crate::store::object::{ObjectId, PlacedObject};

/// Footprint cells of one placed object
#[derive(Debug, Clone)]
pub struct ObjectBounds {
    /// Id of the object
    pub id: ObjectId,
    /// Every grid cell the object's footprint covers
    pub cells: Vec<GridPosition>,
}

/// Occupancy view of the whole placed collection
#[derive(Debug, Clone)]
pub struct CollisionVisualization {
    /// `"x,y"` keys of every occupied cell
    pub occupied_cells: HashSet<String>,
    /// Footprint cells grouped per object, in collection order
    pub object_bounds: Vec<ObjectBounds>,
    /// Occupancy mask indexed `(row, column)`
    pub occupancy: Array2<bool>,
}

impl CollisionVisualization {
    /// Capture the occupancy of the given collection
    pub fn capture(bounds: MapBounds, objects: &[PlacedObject]) -> Self {
        let rows = bounds.grid_height().max(0) as usize;
        let cols = bounds.grid_width().max(0) as usize;

        let mut occupied = HashSet::new();
        let mut object_bounds = Vec::with_capacity(objects.len());
        let mut occupancy = Array2::from_elem((rows, cols), false);

        for object in objects {
            let cells = occupied_cells(object.grid_position, object.grid_size);
            for cell in &cells {
                occupied.insert(cell_key(*cell));
                if cell.grid_x >= 0 && cell.grid_y >= 0 {
                    if let Some(mask) =
                        occupancy.get_mut((cell.grid_y as usize, cell.grid_x as usize))
                    {
                        *mask = true;
                    }
                }
            }
            object_bounds.push(ObjectBounds {
                id: object.id.clone(),
                cells,
            });
        }

        Self {
            occupied_cells: occupied,
            object_bounds,
            occupancy,
        }
    }

    /// Whether the given cell is covered by any footprint
    pub fn is_occupied(&self, cell: GridPosition) -> bool {
        self.occupied_cells.contains(&cell_key(cell))
    }
}

/// Render a grid position as the `"x,y"` key used by `occupied_cells`
pub fn cell_key(cell: GridPosition) -> String {
    format!("{},{}", cell.grid_x, cell.grid_y)
}
