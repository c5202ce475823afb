//! Map defaults and safety limits

// Defaults mirror the reference village map configuration
/// Default map width in grid cells
pub const DEFAULT_GRID_WIDTH: i32 = 32;
/// Default map height in grid cells
pub const DEFAULT_GRID_HEIGHT: i32 = 24;
/// Default edge length of one grid cell in pixels
pub const DEFAULT_TILE_SIZE: f64 = 32.0;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: i32 = 10_000;

/// Maximum Chebyshev radius scanned when relocating a blocked placement
pub const DEFAULT_SEARCH_RADIUS: i32 = 10;

/// Number of snapshots retained before the oldest history entries are evicted
pub const MAX_HISTORY_SIZE: usize = 50;
