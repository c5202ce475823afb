//! Linear history stack with a movable cursor
//!
//! The classic linear undo model: an integer cursor over a snapshot list
//! that is append-only until a new edit branches off the past, at which
//! point the discarded redo branch is truncated. The boundary conditions
//! ("cannot undo", "cannot redo") are reported as `None`, never as errors.

use crate::config::MAX_HISTORY_SIZE;
use crate::history::snapshot::Snapshot;
use crate::store::object::PlacedObject;

/// Bounded sequence of snapshots with undo/redo
#[derive(Debug)]
pub struct HistoryManager {
    snapshots: Vec<Snapshot>,
    current_index: usize,
    max_size: usize,
}

impl HistoryManager {
    /// History seeded with one snapshot of the starting collection
    pub fn new(initial: &[PlacedObject]) -> Self {
        Self::with_capacity(initial, MAX_HISTORY_SIZE)
    }

    /// History with an explicit retention limit (minimum 1)
    pub fn with_capacity(initial: &[PlacedObject], max_size: usize) -> Self {
        Self {
            snapshots: vec![Snapshot::capture(initial)],
            current_index: 0,
            max_size: max_size.max(1),
        }
    }

    /// Record a snapshot if the collection differs from the cursor snapshot
    ///
    /// Recording while undone first truncates the redo branch. When the list
    /// then exceeds the retention limit, the oldest snapshots are evicted
    /// and the cursor shifts with them.
    pub fn record_if_changed(&mut self, objects: &[PlacedObject]) {
        if self
            .snapshots
            .get(self.current_index)
            .is_some_and(|snapshot| snapshot.objects() == objects)
        {
            return;
        }

        self.snapshots.truncate(self.current_index + 1);
        self.snapshots.push(Snapshot::capture(objects));
        self.current_index = self.snapshots.len().saturating_sub(1);

        let overflow = self.snapshots.len().saturating_sub(self.max_size);
        if overflow > 0 {
            self.snapshots.drain(0..overflow);
            self.current_index = self.current_index.saturating_sub(overflow);
        }
    }

    /// Step back one snapshot, returning a fresh copy of its objects
    pub fn undo(&mut self) -> Option<Vec<PlacedObject>> {
        if self.current_index == 0 {
            return None;
        }
        self.current_index -= 1;
        self.snapshots.get(self.current_index).map(Snapshot::restore)
    }

    /// Step forward one snapshot, returning a fresh copy of its objects
    pub fn redo(&mut self) -> Option<Vec<PlacedObject>> {
        if self.current_index + 1 >= self.snapshots.len() {
            return None;
        }
        self.current_index += 1;
        self.snapshots.get(self.current_index).map(Snapshot::restore)
    }

    /// Whether a snapshot exists before the cursor
    pub const fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    /// Whether a snapshot exists after the cursor
    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.snapshots.len()
    }

    /// Discard all history and reseed with one snapshot
    pub fn reset(&mut self, objects: &[PlacedObject]) {
        self.snapshots = vec![Snapshot::capture(objects)];
        self.current_index = 0;
    }

    /// Number of retained snapshots
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Position of the cursor within the retained snapshots
    pub const fn current_index(&self) -> usize {
        self.current_index
    }
}
