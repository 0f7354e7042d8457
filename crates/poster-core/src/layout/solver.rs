//! Tile width calculation
//!
//! Finds the widest common grid tile that lets the whole vertical stack
//! (optional hero, grid rows, separating margins) fit the canvas height.
//! The estimate truncates every simulated height, like the pixel sizes a
//! resampler would produce.

use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::types::Archetype;

/// How an overflowing estimate is brought back inside the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverMode {
    /// Scale the first-pass width by `available / estimated` once.
    ///
    /// Margins and the hero's extra margin do not shrink with the width, so
    /// the result can still overshoot the available height by up to
    /// `margins · (1 - scale)`. This is the established output.
    #[default]
    Linear,
    /// Start from the linear result and search downwards for the widest
    /// width whose estimate fits.
    Strict,
}

/// Sizes grid tiles for a two-column arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DimensionSolver {
    pub mode: SolverMode,
}

impl DimensionSolver {
    pub fn new(mode: SolverMode) -> Self {
        Self { mode }
    }

    /// Largest common grid tile width for `sizes` (width, height) arranged as `archetype`.
    ///
    /// Every size must be non-zero in both dimensions.
    pub fn max_tile_width(&self, sizes: &[(u32, u32)], margin: u32, archetype: Archetype) -> u32 {
        let first_pass = first_pass_width(margin);
        let available = available_height(margin);
        let estimated = estimate_stack_height(sizes, first_pass, margin, archetype);

        if estimated <= available {
            log::debug!(
                "tile width {first_pass}px fits: estimated {estimated}px of {available}px"
            );
            return first_pass;
        }

        let scale = available as f64 / estimated as f64;
        let linear = (f64::from(first_pass) * scale) as u32;
        log::debug!(
            "estimated {estimated}px overflows {available}px, scaling {first_pass}px by {scale:.4} to {linear}px"
        );

        match self.mode {
            SolverMode::Linear => linear,
            SolverMode::Strict => tighten(sizes, linear, margin, archetype, available),
        }
    }
}

/// Width of two equal columns separated by one margin, with a margin on each side
pub fn first_pass_width(margin: u32) -> u32 {
    CANVAS_WIDTH.saturating_sub(margin.saturating_mul(3)) / 2
}

/// Canvas height left after the top and bottom margins
pub fn available_height(margin: u32) -> u64 {
    u64::from(CANVAS_HEIGHT.saturating_sub(margin.saturating_mul(2)))
}

/// Simulated stack height at `tile_width`, as the solver sees it.
///
/// The hero (if any) is followed by one margin; grid rows are separated by
/// one margin each, with none after the last row.
pub fn estimate_stack_height(
    sizes: &[(u32, u32)],
    tile_width: u32,
    margin: u32,
    archetype: Archetype,
) -> u64 {
    let mut total = 0u64;
    let mut grid = sizes;

    if let Some(hero_width) = archetype.hero_width(tile_width, margin) {
        if let Some((&hero, rest)) = sizes.split_first() {
            total += truncated_height(hero, hero_width) + u64::from(margin);
            grid = rest;
        }
    }

    let row_count = grid.chunks(2).len();
    for (row, pair) in grid.chunks(2).enumerate() {
        total += pair
            .iter()
            .map(|&size| truncated_height(size, tile_width))
            .max()
            .unwrap_or(0);
        if row + 1 < row_count {
            total += u64::from(margin);
        }
    }

    total
}

/// Height of an image scaled to `width`, truncated to whole pixels
fn truncated_height((width, height): (u32, u32), target_width: u32) -> u64 {
    let aspect = f64::from(width) / f64::from(height);
    (f64::from(target_width) / aspect) as u64
}

/// Widest width in `1..=upper` whose estimate fits `available`.
/// The estimate never decreases as the width grows, so a binary search is exact.
fn tighten(
    sizes: &[(u32, u32)],
    upper: u32,
    margin: u32,
    archetype: Archetype,
    available: u64,
) -> u32 {
    let fits = |width: u32| estimate_stack_height(sizes, width, margin, archetype) <= available;

    if upper <= 1 || fits(upper) {
        return upper.max(1);
    }

    let (mut low, mut high) = (1, upper - 1);
    while low < high {
        let mid = low + (high - low).div_ceil(2);
        if fits(mid) {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    log::debug!("strict fit lowered tile width from {upper}px to {low}px");
    low
}

// =============================================================================
// Tests
// =============================================================================
