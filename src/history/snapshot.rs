//! Immutable captures of the placed-object collection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::object::PlacedObject;

/// Deep copy of every placed object at one point in history
///
/// Snapshots never alias the live collection: the objects are cloned on
/// capture and cloned again on restore, so a restored state can be handed
/// out directly without further copying by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    objects: Vec<PlacedObject>,
    recorded_at: DateTime<Utc>,
}

impl Snapshot {
    /// Capture an independent copy of the given collection
    pub fn capture(objects: &[PlacedObject]) -> Self {
        Self {
            objects: objects.to_vec(),
            recorded_at: Utc::now(),
        }
    }

    /// Objects stored in this snapshot
    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    /// Moment the snapshot was recorded
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// Clone the stored objects for restoration
    pub fn restore(&self) -> Vec<PlacedObject> {
        self.objects.clone()
    }
}
