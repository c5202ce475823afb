//! Typed object model, templates, and partial updates
//!
//! Placement logic only ever reads an object's id, grid position, and grid
//! size. The category payload is a tagged union that rides along untouched,
//! so snapshots and serialized records keep their category data without the
//! core branching on it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::spatial::geometry::{GridPosition, GridSize, PixelPosition, PixelRect, PixelSize};

/// Broad classification of a placed object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectCategory {
    /// An inhabitant of the map
    Character,
    /// Flora
    Plant,
    /// A structure
    Building,
}

impl fmt::Display for ObjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character => write!(f, "character"),
            Self::Plant => write!(f, "plant"),
            Self::Building => write!(f, "building"),
        }
    }
}

/// Category payload carried by a placed object
///
/// Opaque to the placement core: geometry, collision, and history never
/// inspect the variant fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum ObjectKind {
    /// An interactive inhabitant
    Character {
        /// Name the character introduces itself with
        display_name: String,
        /// Line offered when first approached
        dialogue: String,
        /// Whether the character responds to interaction
        interactable: bool,
    },
    /// Flora with a growth cycle
    Plant {
        /// Species identifier
        species: String,
        /// Growth progress from seed (0) to mature (3)
        growth_stage: u8,
        /// Whether the plant currently yields a harvest
        harvestable: bool,
    },
    /// A structure occupying one or more cells
    Building {
        /// Whether the structure can be entered
        enterable: bool,
        /// Number of occupants the structure holds
        capacity: Option<u32>,
    },
}

impl ObjectKind {
    /// Category tag of this payload
    pub const fn category(&self) -> ObjectCategory {
        match self {
            Self::Character { .. } => ObjectCategory::Character,
            Self::Plant { .. } => ObjectCategory::Plant,
            Self::Building { .. } => ObjectCategory::Building,
        }
    }
}

/// Caller-supplied blueprint for creating placed objects
///
/// Opaque beyond the fields the store needs: the name and payload are copied
/// onto created objects verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectTemplate {
    /// Display name copied onto created objects
    pub name: String,
    /// Category payload copied onto created objects
    pub kind: ObjectKind,
    /// Visual size in pixels
    pub default_size: PixelSize,
    /// Footprint in grid cells
    pub default_grid_size: GridSize,
}

/// Unique identifier of a placed object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(String);

impl ObjectId {
    pub(crate) fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One object committed to the map
///
/// The grid fields are authoritative. For any object created or moved
/// through the store, the pixel position equals the grid position scaled by
/// the map tile size; only continuous entities checked through the pixel
/// overlap test live off-grid, and those are never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    /// Unique id assigned at creation
    pub id: ObjectId,
    /// Display name
    pub name: String,
    /// Category payload, opaque to placement logic
    #[serde(flatten)]
    pub kind: ObjectKind,
    /// Top-left cell of the footprint
    pub grid_position: GridPosition,
    /// Footprint in grid cells
    pub grid_size: GridSize,
    /// Top-left corner in pixels
    pub pixel_position: PixelPosition,
    /// Visual size in pixels
    pub pixel_size: PixelSize,
}

impl PlacedObject {
    /// Whether the footprint covers the given cell
    pub const fn contains_cell(&self, cell: GridPosition) -> bool {
        cell.grid_x >= self.grid_position.grid_x
            && cell.grid_x < self.grid_position.grid_x + self.grid_size.grid_width
            && cell.grid_y >= self.grid_position.grid_y
            && cell.grid_y < self.grid_position.grid_y + self.grid_size.grid_height
    }

    /// Visual bounding rectangle in pixel space
    pub const fn pixel_rect(&self) -> PixelRect {
        PixelRect::from_parts(self.pixel_position, self.pixel_size)
    }
}

/// Requested new position in exactly one coordinate space
///
/// Pixel and grid coordinates for the same move would be redundant at best
/// and contradictory at worst, so the two spaces are mutually exclusive
/// variants rather than independent fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PositionUpdate {
    /// Free pixel coordinates, snapped to the grid before validation
    Pixel(PixelPosition),
    /// Direct grid cell; the pixel position is derived from it
    Grid(GridPosition),
}

/// Partial update applied atomically by the store
///
/// Fields left as `None` keep their current value. A rejected update leaves
/// the stored object completely unchanged, including any non-positional
/// fields the update carried.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectUpdate {
    /// New display name
    pub name: Option<String>,
    /// Replacement category payload
    pub kind: Option<ObjectKind>,
    /// New footprint size, re-validated against neighbours and bounds
    pub grid_size: Option<GridSize>,
    /// New position in exactly one coordinate space
    pub position: Option<PositionUpdate>,
}

impl ObjectUpdate {
    /// Update that only moves the object to a grid cell
    pub const fn move_to_grid(cell: GridPosition) -> Self {
        Self {
            name: None,
            kind: None,
            grid_size: None,
            position: Some(PositionUpdate::Grid(cell)),
        }
    }

    /// Update that only moves the object to a pixel position
    pub const fn move_to_pixel(position: PixelPosition) -> Self {
        Self {
            name: None,
            kind: None,
            grid_size: None,
            position: Some(PositionUpdate::Pixel(position)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_maps_to_category() {
        let character = ObjectKind::Character {
            display_name: String::from("Elder"),
            dialogue: String::from("Welcome, traveler."),
            interactable: true,
        };
        assert_eq!(character.category(), ObjectCategory::Character);
        assert_eq!(character.category().to_string(), "character");

        let building = ObjectKind::Building {
            enterable: true,
            capacity: Some(4),
        };
        assert_eq!(building.category(), ObjectCategory::Building);
    }

    #[test]
    fn test_contains_cell_is_half_open() {
        let object = PlacedObject {
            id: ObjectId::from_raw("obj_1_abcdefghi"),
            name: String::from("house"),
            kind: ObjectKind::Building {
                enterable: true,
                capacity: Some(4),
            },
            grid_position: GridPosition::new(2, 3),
            grid_size: GridSize::new(3, 2),
            pixel_position: PixelPosition::new(64.0, 96.0),
            pixel_size: PixelSize::new(96.0, 64.0),
        };

        assert!(object.contains_cell(GridPosition::new(2, 3)));
        assert!(object.contains_cell(GridPosition::new(4, 4)));
        assert!(!object.contains_cell(GridPosition::new(5, 3)));
        assert!(!object.contains_cell(GridPosition::new(2, 5)));
        assert!(!object.contains_cell(GridPosition::new(1, 3)));
    }

    #[test]
    fn test_serialized_record_is_flat_and_tagged() {
        let object = PlacedObject {
            id: ObjectId::from_raw("obj_1_abcdefghi"),
            name: String::from("berry bush"),
            kind: ObjectKind::Plant {
                species: String::from("berry"),
                growth_stage: 3,
                harvestable: true,
            },
            grid_position: GridPosition::new(0, 0),
            grid_size: GridSize::new(1, 1),
            pixel_position: PixelPosition::new(0.0, 0.0),
            pixel_size: PixelSize::new(32.0, 32.0),
        };

        let value = serde_json::to_value(&object).unwrap_or_default();
        assert_eq!(value.get("category").and_then(|v| v.as_str()), Some("plant"));
        assert_eq!(value.get("species").and_then(|v| v.as_str()), Some("berry"));
        assert_eq!(value.get("growth_stage").and_then(|v| v.as_u64()), Some(3));
        assert!(value.get("grid_position").is_some());

        let raw = value.to_string();
        let parsed: std::result::Result<PlacedObject, _> = serde_json::from_str(&raw);
        assert_eq!(parsed.ok().as_ref(), Some(&object));
    }
}
