//! Shared constants for poster composition
//!
//! This module centralizes the fixed design parameters of the poster:
//! canvas geometry, the shadow look and the two style presets.

// =============================================================================
// Canvas
// =============================================================================

/// Canvas width in pixels
pub const CANVAS_WIDTH: u32 = 1200;

/// Canvas height in pixels
pub const CANVAS_HEIGHT: u32 = 1600;

/// Canvas dimensions as tuple (width, height)
pub const CANVAS_DIMENSIONS: (u32, u32) = (CANVAS_WIDTH, CANVAS_HEIGHT);

/// Background of the canvas wherever nothing was drawn (fully transparent)
pub const BACKGROUND_RGBA: [u8; 4] = [0, 0, 0, 0];

// =============================================================================
// Input
// =============================================================================

/// Fewest source images a poster can be built from
pub const MIN_IMAGES: usize = 5;

/// Image count that selects the "poster" style instead of "dense"
pub const POSTER_STYLE_COUNT: usize = 5;

// =============================================================================
// Drop Shadow
// =============================================================================

/// Gaussian blur radius (sigma) of the shadow, in pixels
pub const SHADOW_BLUR_RADIUS: u32 = 15;

/// Shadow offset from the tile (x, y), in pixels
pub const SHADOW_OFFSET: (i64, i64) = (8, 8);

/// Shadow alpha before blurring (0-255)
pub const SHADOW_OPACITY: u8 = 80;

/// Shadow color (RGB)
pub const SHADOW_COLOR: [u8; 3] = [0, 0, 0];

/// Inset of the shadow rectangle from the tile edge, in pixels
pub const SHADOW_SHRINK: u32 = 2;

/// Padding around the shadow bitmap, as a multiple of the blur radius.
/// Three sigmas is where the Gaussian tail becomes invisible.
pub const SHADOW_PADDING_FACTOR: u32 = 3;

// =============================================================================
// Style Presets
// =============================================================================

/// Margin of the "poster" style (5 images), in pixels
pub const POSTER_MARGIN: u32 = 50;

/// Vertical ratio of the "poster" style (golden section, sits low)
pub const POSTER_VERTICAL_RATIO: f64 = 0.618;

/// Margin of the "dense" style (6+ images), in pixels
pub const DENSE_MARGIN: u32 = 25;

/// Vertical ratio of the "dense" style (centered)
pub const DENSE_VERTICAL_RATIO: f64 = 0.5;
