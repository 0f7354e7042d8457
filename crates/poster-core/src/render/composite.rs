//! Tile compositing
//!
//! Pastes a tile and its drop shadow onto the canvas with "over" alpha
//! blending. The shadow always goes down before its tile, and callers paste
//! tiles in draw order so a later shadow never covers an earlier tile.

use image::{RgbaImage, imageops};

use super::ShadowRenderer;
use crate::types::ShadowSpec;

/// Draws tiles with their shadows onto a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Compositor {
    shadows: ShadowRenderer,
}

impl Compositor {
    pub fn new(spec: ShadowSpec) -> Self {
        Self {
            shadows: ShadowRenderer::new(spec),
        }
    }

    pub fn shadow_spec(&self) -> &ShadowSpec {
        &self.shadows.spec
    }

    /// Paste `tile` with its top-left corner at `(x, y)`.
    ///
    /// Parts of the tile or shadow outside the canvas are clipped.
    pub fn paste(&self, canvas: &mut RgbaImage, tile: &RgbaImage, x: i64, y: i64) {
        let shadow = self.shadows.render(tile.dimensions());
        let (shadow_x, shadow_y) = self.shadow_origin(x, y);

        imageops::overlay(canvas, &shadow, shadow_x, shadow_y);
        imageops::overlay(canvas, tile, x, y);
    }

    /// Top-left corner of the shadow bitmap for a tile at `(x, y)`
    pub fn shadow_origin(&self, x: i64, y: i64) -> (i64, i64) {
        let spec = self.shadow_spec();
        let padding = i64::from(spec.padding());
        let (offset_x, offset_y) = spec.offset;
        (x - padding + offset_x, y - padding + offset_y)
    }
}
