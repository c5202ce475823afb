//! Coordinate, size, and map-bounds types
//!
//! Grid coordinates are plain integers and deliberately unchecked: the
//! nearest-position search legitimately probes cells outside the map, and
//! bounds enforcement belongs to the collision checks, not the types.

use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_TILE_SIZE, MAX_GRID_DIMENSION,
};
use crate::error::{Result, invalid_parameter};

/// Cell address on the tile grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    /// Column index, leftmost column is 0
    pub grid_x: i32,
    /// Row index, topmost row is 0
    pub grid_y: i32,
}

impl GridPosition {
    /// Create a cell address
    pub const fn new(grid_x: i32, grid_y: i32) -> Self {
        Self { grid_x, grid_y }
    }

    /// Cell address shifted by the given deltas
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            grid_x: self.grid_x + dx,
            grid_y: self.grid_y + dy,
        }
    }
}

/// Footprint of an object in whole grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    /// Width in cells
    pub grid_width: i32,
    /// Height in cells
    pub grid_height: i32,
}

impl GridSize {
    /// Create a footprint
    pub const fn new(grid_width: i32, grid_height: i32) -> Self {
        Self {
            grid_width,
            grid_height,
        }
    }
}

/// Continuous position in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPosition {
    /// Horizontal pixel coordinate
    pub x: f64,
    /// Vertical pixel coordinate
    pub y: f64,
}

impl PixelPosition {
    /// Create a pixel position
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Visual size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelSize {
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl PixelSize {
    /// Create a pixel size
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in pixel space
///
/// Used for overlap tests against entities whose position is not snapped to
/// the grid, such as a continuously moving avatar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl PixelRect {
    /// Create a rectangle from its top-left corner and size
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering `size` from `position`
    pub const fn from_parts(position: PixelPosition, size: PixelSize) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Horizontal center of the rectangle
    pub const fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical center of the rectangle
    pub const fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Fixed dimensions of the map the placement core operates on
///
/// Read-only external configuration: validated once at construction and
/// never modified by the core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    grid_width: i32,
    grid_height: i32,
    tile_size: f64,
}

impl MapBounds {
    /// Create validated map bounds
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a grid dimension is outside
    /// `1..=MAX_GRID_DIMENSION` or the tile size is not a positive finite
    /// number.
    pub fn new(grid_width: i32, grid_height: i32, tile_size: f64) -> Result<Self> {
        if grid_width < 1 || grid_width > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "grid_width",
                &grid_width,
                &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
            ));
        }
        if grid_height < 1 || grid_height > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "grid_height",
                &grid_height,
                &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
            ));
        }
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &"must be a positive finite number",
            ));
        }
        Ok(Self {
            grid_width,
            grid_height,
            tile_size,
        })
    }

    /// Map width in grid cells
    pub const fn grid_width(&self) -> i32 {
        self.grid_width
    }

    /// Map height in grid cells
    pub const fn grid_height(&self) -> i32 {
        self.grid_height
    }

    /// Edge length of one grid cell in pixels
    pub const fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Total map width in pixels
    pub const fn pixel_width(&self) -> f64 {
        self.grid_width as f64 * self.tile_size
    }

    /// Total map height in pixels
    pub const fn pixel_height(&self) -> f64 {
        self.grid_height as f64 * self.tile_size
    }
}

impl Default for MapBounds {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}
