//! Authoritative placed-object collection
//!
//! The store is the exclusive owner of current state. Every mutation is
//! validated against the grid index before it commits, and a rejected
//! mutation leaves the collection untouched. Rejections are reported as
//! errors the caller must check, never as exceptions.

use tracing::warn;

use crate::config::DEFAULT_SEARCH_RADIUS;
use crate::error::{PlacementError, Result, invalid_parameter};
use crate::spatial::geometry::{GridPosition, GridSize, MapBounds, PixelPosition, PixelRect};
use crate::spatial::index::{CollisionResult, GridIndex};
use crate::spatial::visualization::CollisionVisualization;
use crate::store::ids::IdGenerator;
use crate::store::object::{
    ObjectId, ObjectTemplate, ObjectUpdate, PlacedObject, PositionUpdate,
};

/// Exclusive owner of the live placed-object collection
///
/// Objects keep their insertion order, which makes lookups deterministic
/// and lets snapshots restore the collection byte for byte.
#[derive(Debug)]
pub struct SpatialObjectStore {
    index: GridIndex,
    objects: Vec<PlacedObject>,
    ids: IdGenerator,
}

impl SpatialObjectStore {
    /// Create an empty store over the given map bounds
    pub fn new(bounds: MapBounds) -> Self {
        Self {
            index: GridIndex::new(bounds),
            objects: Vec::new(),
            ids: IdGenerator::new(),
        }
    }

    /// Create an empty store with a seeded id generator
    pub fn with_seed(bounds: MapBounds, seed: u64) -> Self {
        Self {
            index: GridIndex::new(bounds),
            objects: Vec::new(),
            ids: IdGenerator::with_seed(seed),
        }
    }

    /// Grid index the store validates against
    pub const fn index(&self) -> &GridIndex {
        &self.index
    }

    /// Live collection in insertion order
    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    /// Number of placed objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Look up an object by id
    pub fn get_object(&self, id: &ObjectId) -> Option<&PlacedObject> {
        self.objects.iter().find(|object| &object.id == id)
    }

    /// First object whose footprint covers the cell, in insertion order
    ///
    /// At most one object can match while the no-overlap invariant holds.
    pub fn get_object_at(&self, cell: GridPosition) -> Option<&PlacedObject> {
        self.objects.iter().find(|object| object.contains_cell(cell))
    }

    /// Place a new object built from a template
    ///
    /// The pixel position is snapped to the grid. If the snapped cell is
    /// blocked, the nearest valid cell within the default search radius is
    /// used instead. The committed object's pixel position is derived from
    /// the final grid cell.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a non-positive template footprint, and
    /// `PlacementExhausted` when no valid cell exists within the search
    /// radius; no object is created in either case.
    pub fn add_object(
        &mut self,
        template: &ObjectTemplate,
        position: PixelPosition,
    ) -> Result<ObjectId> {
        let size = template.default_grid_size;
        if size.grid_width < 1 || size.grid_height < 1 {
            return Err(invalid_parameter(
                "default_grid_size",
                &format!("{}x{}", size.grid_width, size.grid_height),
                &"footprint dimensions must be positive",
            ));
        }

        let target = self.index.pixel_to_grid(self.index.snap_to_grid(position));
        let placement = if self
            .index
            .check_collision(target, size, &self.objects, None)
            .valid_position
        {
            target
        } else {
            match self.index.find_nearest_valid_position(
                target,
                size,
                &self.objects,
                DEFAULT_SEARCH_RADIUS,
            ) {
                Some(cell) => cell,
                None => {
                    warn!(
                        grid_x = target.grid_x,
                        grid_y = target.grid_y,
                        "cannot place object: no valid position found"
                    );
                    return Err(PlacementError::PlacementExhausted {
                        target,
                        search_radius: DEFAULT_SEARCH_RADIUS,
                    });
                }
            }
        };

        let id = self.ids.next_id();
        self.objects.push(PlacedObject {
            id: id.clone(),
            name: template.name.clone(),
            kind: template.kind.clone(),
            grid_position: placement,
            grid_size: size,
            pixel_position: self.index.grid_to_pixel(placement),
            pixel_size: template.default_size,
        });
        Ok(id)
    }

    /// Apply a partial update atomically
    ///
    /// A position given in pixels is snapped to the grid; a position given
    /// as a grid cell has its pixel position derived from it, so the two
    /// fields can never drift apart. Whenever the footprint's cell or size
    /// changes, the result is re-validated with the object's own footprint
    /// excluded.
    ///
    /// # Errors
    ///
    /// Returns `UnknownObject` if no object carries the id, and
    /// `MoveBlocked` when the updated footprint would collide or leave the
    /// map. On any error the stored object is left completely unchanged,
    /// including non-positional fields the update carried.
    pub fn update_object(&mut self, id: &ObjectId, update: ObjectUpdate) -> Result<()> {
        let Some(current) = self.objects.iter().find(|object| &object.id == id) else {
            warn!(id = %id, "cannot update object: unknown id");
            return Err(PlacementError::UnknownObject { id: id.clone() });
        };

        let mut candidate = current.clone();
        if let Some(name) = update.name {
            candidate.name = name;
        }
        if let Some(kind) = update.kind {
            candidate.kind = kind;
        }
        if let Some(size) = update.grid_size {
            candidate.grid_size = size;
        }
        match update.position {
            Some(PositionUpdate::Pixel(pixel)) => {
                candidate.grid_position = self.index.pixel_to_grid(self.index.snap_to_grid(pixel));
            }
            Some(PositionUpdate::Grid(cell)) => {
                candidate.grid_position = cell;
            }
            None => {}
        }
        candidate.pixel_position = self.index.grid_to_pixel(candidate.grid_position);

        let geometry_changed = candidate.grid_position != current.grid_position
            || candidate.grid_size != current.grid_size;
        if geometry_changed {
            let result = self.index.check_collision(
                candidate.grid_position,
                candidate.grid_size,
                &self.objects,
                Some(id),
            );
            if !result.valid_position {
                warn!(
                    id = %id,
                    grid_x = candidate.grid_position.grid_x,
                    grid_y = candidate.grid_position.grid_y,
                    "cannot move object: position would cause collision"
                );
                return Err(PlacementError::MoveBlocked {
                    id: id.clone(),
                    target: candidate.grid_position,
                    out_of_bounds: result.out_of_bounds,
                    colliding: result.colliding.len(),
                });
            }
        }

        if let Some(slot) = self.objects.iter_mut().find(|object| &object.id == id) {
            *slot = candidate;
        }
        Ok(())
    }

    /// Remove an object by id, returning it; absent ids are a no-op
    pub fn remove_object(&mut self, id: &ObjectId) -> Option<PlacedObject> {
        let slot = self.objects.iter().position(|object| &object.id == id)?;
        Some(self.objects.remove(slot))
    }

    /// Whether a footprint at the given cell would be rejected
    pub fn check_collision(
        &self,
        position: GridPosition,
        size: GridSize,
        exclude: Option<&ObjectId>,
    ) -> bool {
        !self
            .index
            .check_collision(position, size, &self.objects, exclude)
            .valid_position
    }

    /// Full collision detail for a candidate footprint
    pub fn collision_info(
        &self,
        position: GridPosition,
        size: GridSize,
        exclude: Option<&ObjectId>,
    ) -> CollisionResult {
        self.index
            .check_collision(position, size, &self.objects, exclude)
    }

    /// Occupancy view of the current collection for renderers
    pub fn collision_visualization(&self) -> CollisionVisualization {
        self.index.collision_visualization(&self.objects)
    }

    /// Pixel-space overlap test for continuously positioned entities
    pub fn has_pixel_overlap(&self, rect: PixelRect, exclude: Option<&ObjectId>) -> bool {
        self.index.has_pixel_overlap(rect, &self.objects, exclude)
    }

    /// Replace the whole collection
    ///
    /// The history-restoration path used by undo, redo, and reset. Snapshot
    /// contents were validated when they were captured, so they are
    /// installed as-is.
    pub fn replace(&mut self, objects: Vec<PlacedObject>) {
        self.objects = objects;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::geometry::PixelSize;
    use crate::spatial::index::grid_rectangles_overlap;
    use crate::store::object::ObjectKind;

    fn store() -> SpatialObjectStore {
        SpatialObjectStore::with_seed(MapBounds::default(), 42)
    }

    fn bush_template() -> ObjectTemplate {
        ObjectTemplate {
            name: String::from("berry bush"),
            kind: ObjectKind::Plant {
                species: String::from("berry"),
                growth_stage: 3,
                harvestable: true,
            },
            default_size: PixelSize::new(32.0, 64.0),
            default_grid_size: GridSize::new(1, 2),
        }
    }

    fn house_template() -> ObjectTemplate {
        ObjectTemplate {
            name: String::from("house"),
            kind: ObjectKind::Building {
                enterable: true,
                capacity: Some(4),
            },
            default_size: PixelSize::new(128.0, 96.0),
            default_grid_size: GridSize::new(4, 3),
        }
    }

    fn assert_invariants(store: &SpatialObjectStore) {
        let objects = store.objects();
        for object in objects {
            assert!(
                store
                    .index()
                    .is_within_bounds(object.grid_position, object.grid_size),
                "object {} escaped the map",
                object.id
            );
        }
        for (i, a) in objects.iter().enumerate() {
            for b in objects.iter().skip(i + 1) {
                assert!(
                    !grid_rectangles_overlap(
                        a.grid_position,
                        a.grid_size,
                        b.grid_position,
                        b.grid_size
                    ),
                    "objects {} and {} overlap",
                    a.id,
                    b.id
                );
            }
        }
    }

    #[test]
    fn test_add_snaps_pixels_to_grid() {
        let mut store = store();
        let id = store
            .add_object(&bush_template(), PixelPosition::new(45.5, 70.2))
            .ok();
        let object = id.as_ref().and_then(|id| store.get_object(id));

        assert_eq!(
            object.map(|o| o.grid_position),
            Some(GridPosition::new(1, 2))
        );
        assert_eq!(
            object.map(|o| o.pixel_position),
            Some(PixelPosition::new(32.0, 64.0))
        );
        assert_invariants(&store);
    }

    #[test]
    fn test_add_relocates_blocked_placement() {
        let mut store = store();
        let first = store.add_object(&bush_template(), PixelPosition::new(0.0, 0.0));
        assert!(first.is_ok());

        let second = store
            .add_object(&bush_template(), PixelPosition::new(0.0, 0.0))
            .ok();
        let relocated = second.as_ref().and_then(|id| store.get_object(id));

        // Ring scan order pins the relocation to (1, 0)
        assert_eq!(
            relocated.map(|o| o.grid_position),
            Some(GridPosition::new(1, 0))
        );
        assert_eq!(store.len(), 2);
        assert_invariants(&store);
    }

    #[test]
    fn test_add_fails_when_search_is_exhausted() {
        let mut store = store();
        // Cell (50, 0) is more than the search radius past the map edge
        let result = store.add_object(&house_template(), PixelPosition::new(1600.0, 0.0));

        assert!(matches!(
            result,
            Err(PlacementError::PlacementExhausted {
                target: GridPosition {
                    grid_x: 50,
                    grid_y: 0
                },
                search_radius: DEFAULT_SEARCH_RADIUS,
            })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_rejects_degenerate_footprint() {
        let mut store = store();
        let mut template = bush_template();
        template.default_grid_size = GridSize::new(0, 2);

        let result = store.add_object(&template, PixelPosition::new(0.0, 0.0));
        assert!(matches!(
            result,
            Err(PlacementError::InvalidParameter {
                parameter: "default_grid_size",
                ..
            })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_moves_and_keeps_pixels_consistent() {
        let mut store = store();
        let id = match store.add_object(&bush_template(), PixelPosition::new(0.0, 0.0)) {
            Ok(id) => id,
            Err(_) => unreachable!("placement on an empty map must succeed"),
        };

        let moved = store.update_object(&id, ObjectUpdate::move_to_grid(GridPosition::new(5, 5)));
        assert!(moved.is_ok());

        let object = store.get_object(&id);
        assert_eq!(
            object.map(|o| o.grid_position),
            Some(GridPosition::new(5, 5))
        );
        assert_eq!(
            object.map(|o| o.pixel_position),
            Some(PixelPosition::new(160.0, 160.0))
        );
        assert_invariants(&store);
    }

    #[test]
    fn test_blocked_update_changes_nothing() {
        let mut store = store();
        let first = store.add_object(&bush_template(), PixelPosition::new(0.0, 0.0));
        assert!(first.is_ok());
        let id = match store.add_object(&bush_template(), PixelPosition::new(160.0, 0.0)) {
            Ok(id) => id,
            Err(_) => unreachable!("placement on a free cell must succeed"),
        };

        let before = store.objects().to_vec();
        let update = ObjectUpdate {
            name: Some(String::from("renamed while moving")),
            position: Some(PositionUpdate::Grid(GridPosition::new(0, 0))),
            ..ObjectUpdate::default()
        };
        let result = store.update_object(&id, update);

        assert!(matches!(result, Err(PlacementError::MoveBlocked { .. })));
        // Atomic rejection: the name change is dropped along with the move
        assert_eq!(store.objects(), before.as_slice());
    }

    #[test]
    fn test_update_size_is_revalidated() {
        let mut store = store();
        let id = match store.add_object(&bush_template(), PixelPosition::new(0.0, 0.0)) {
            Ok(id) => id,
            Err(_) => unreachable!("placement on an empty map must succeed"),
        };
        let blocker = store.add_object(&bush_template(), PixelPosition::new(32.0, 0.0));
        assert!(blocker.is_ok());

        // Growing to 2x2 would overlap the neighbour in column 1
        let grow = ObjectUpdate {
            grid_size: Some(GridSize::new(2, 2)),
            ..ObjectUpdate::default()
        };
        assert!(matches!(
            store.update_object(&id, grow),
            Err(PlacementError::MoveBlocked { .. })
        ));
        assert_eq!(
            store.get_object(&id).map(|o| o.grid_size),
            Some(GridSize::new(1, 2))
        );
        assert_invariants(&store);
    }

    #[test]
    fn test_update_unknown_id_is_an_error() {
        let mut store = store();
        let ghost = ObjectId::from_raw("obj_99_zzzzzzzzz");
        assert!(matches!(
            store.update_object(&ghost, ObjectUpdate::default()),
            Err(PlacementError::UnknownObject { .. })
        ));
    }

    #[test]
    fn test_remove_is_a_noop_for_absent_ids() {
        let mut store = store();
        let id = match store.add_object(&bush_template(), PixelPosition::new(0.0, 0.0)) {
            Ok(id) => id,
            Err(_) => unreachable!("placement on an empty map must succeed"),
        };

        let removed = store.remove_object(&id);
        assert_eq!(removed.map(|o| o.id), Some(id.clone()));
        assert!(store.is_empty());
        assert!(store.remove_object(&id).is_none());
    }

    #[test]
    fn test_get_object_at_respects_footprints() {
        let mut store = store();
        let id = match store.add_object(&house_template(), PixelPosition::new(64.0, 64.0)) {
            Ok(id) => id,
            Err(_) => unreachable!("placement on an empty map must succeed"),
        };

        // House anchored at (2, 2) with a 4x3 footprint
        assert_eq!(
            store.get_object_at(GridPosition::new(5, 4)).map(|o| &o.id),
            Some(&id)
        );
        assert!(store.get_object_at(GridPosition::new(6, 2)).is_none());
        assert!(store.get_object_at(GridPosition::new(1, 2)).is_none());
    }

    #[test]
    fn test_replace_installs_collection_unchanged() {
        let mut store = store();
        let first = store.add_object(&bush_template(), PixelPosition::new(0.0, 0.0));
        assert!(first.is_ok());
        let before = store.objects().to_vec();

        store.replace(Vec::new());
        assert!(store.is_empty());

        store.replace(before.clone());
        assert_eq!(store.objects(), before.as_slice());
    }
}
