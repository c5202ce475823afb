//! Editing facade pairing the object store with undo history
//!
//! User-driven mutations flow through the store and are recorded as
//! snapshots only after they commit. Undo and redo restore snapshots through
//! the store's `replace` operation, which the history never observes, so the
//! two directions of data flow cannot re-enter each other.

use crate::error::Result;
use crate::history::stack::HistoryManager;
use crate::spatial::geometry::{GridPosition, GridSize, MapBounds, PixelPosition, PixelRect};
use crate::spatial::index::CollisionResult;
use crate::spatial::visualization::CollisionVisualization;
use crate::store::collection::SpatialObjectStore;
use crate::store::object::{ObjectId, ObjectTemplate, ObjectUpdate, PlacedObject};

/// Map editor core: authoritative object state plus bounded undo history
#[derive(Debug)]
pub struct Editor {
    store: SpatialObjectStore,
    history: HistoryManager,
}

impl Editor {
    /// Editor over the given map, starting from an empty collection
    pub fn new(bounds: MapBounds) -> Self {
        let store = SpatialObjectStore::new(bounds);
        let history = HistoryManager::new(store.objects());
        Self { store, history }
    }

    /// Editor with a seeded id generator for reproducible sessions
    pub fn with_seed(bounds: MapBounds, seed: u64) -> Self {
        let store = SpatialObjectStore::with_seed(bounds, seed);
        let history = HistoryManager::new(store.objects());
        Self { store, history }
    }

    /// Place a new object; the committed placement becomes an undo step
    ///
    /// # Errors
    ///
    /// Propagates the store's rejection; nothing is recorded on failure.
    pub fn add_object(
        &mut self,
        template: &ObjectTemplate,
        position: PixelPosition,
    ) -> Result<ObjectId> {
        let id = self.store.add_object(template, position)?;
        self.history.record_if_changed(self.store.objects());
        Ok(id)
    }

    /// Update an object; the committed change becomes an undo step
    ///
    /// # Errors
    ///
    /// Propagates the store's rejection; nothing is recorded on failure.
    pub fn update_object(&mut self, id: &ObjectId, update: ObjectUpdate) -> Result<()> {
        self.store.update_object(id, update)?;
        self.history.record_if_changed(self.store.objects());
        Ok(())
    }

    /// Remove an object; a successful removal becomes an undo step
    pub fn remove_object(&mut self, id: &ObjectId) -> Option<PlacedObject> {
        let removed = self.store.remove_object(id);
        if removed.is_some() {
            self.history.record_if_changed(self.store.objects());
        }
        removed
    }

    /// Step back to the previous snapshot; false at the history boundary
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(objects) => {
                self.store.replace(objects);
                true
            }
            None => false,
        }
    }

    /// Step forward to the next snapshot; false at the history boundary
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(objects) => {
                self.store.replace(objects);
                true
            }
            None => false,
        }
    }

    /// Whether an undo step is available
    pub const fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Clear the map and restart history from the empty state
    pub fn reset(&mut self) {
        self.store.replace(Vec::new());
        self.history.reset(self.store.objects());
    }

    /// Discard undo history while keeping the current collection
    pub fn clear_history(&mut self) {
        self.history.reset(self.store.objects());
    }

    /// Live objects in insertion order
    pub fn objects(&self) -> &[PlacedObject] {
        self.store.objects()
    }

    /// Look up an object by id
    pub fn get_object(&self, id: &ObjectId) -> Option<&PlacedObject> {
        self.store.get_object(id)
    }

    /// Object whose footprint covers the cell, if any
    pub fn get_object_at(&self, cell: GridPosition) -> Option<&PlacedObject> {
        self.store.get_object_at(cell)
    }

    /// Whether a footprint at the given cell would be rejected
    pub fn check_collision(
        &self,
        position: GridPosition,
        size: GridSize,
        exclude: Option<&ObjectId>,
    ) -> bool {
        self.store.check_collision(position, size, exclude)
    }

    /// Full collision detail for a candidate footprint
    pub fn collision_info(
        &self,
        position: GridPosition,
        size: GridSize,
        exclude: Option<&ObjectId>,
    ) -> CollisionResult {
        self.store.collision_info(position, size, exclude)
    }

    /// Occupancy view of the current collection for renderers
    pub fn collision_visualization(&self) -> CollisionVisualization {
        self.store.collision_visualization()
    }

    /// Pixel-space overlap test for continuously positioned entities
    pub fn has_pixel_overlap(&self, rect: PixelRect, exclude: Option<&ObjectId>) -> bool {
        self.store.has_pixel_overlap(rect, exclude)
    }

    /// Read access to the underlying store
    pub const fn store(&self) -> &SpatialObjectStore {
        &self.store
    }

    /// Read access to the undo history
    pub const fn history(&self) -> &HistoryManager {
        &self.history
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(MapBounds::default())
    }
}
