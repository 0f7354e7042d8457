//! Layout data types for poster composition
//!
//! These types represent the geometry computed from image dimensions
//! before any pixel is touched.

use crate::types::{Archetype, Style};

/// Where a tile sits in the arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileRole {
    /// Full-width tile above the grid
    Hero,
    /// Left column of a grid row
    Left,
    /// Right column of a grid row
    Right,
}

/// A single scaled tile and its top-left corner on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Index of the source image
    pub source_index: usize,
    pub role: TileRole,
    /// Grid row (hero tiles have none)
    pub row: Option<usize>,
    pub x: i64,
    pub y: i64,
    /// Scaled width in pixels
    pub width: u32,
    /// Scaled height in pixels
    pub height: u32,
}

impl Placement {
    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> i64 {
        self.y + i64::from(self.height)
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> i64 {
        self.x + i64::from(self.width)
    }
}

/// Complete layout for one poster, in draw order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutPlan {
    pub archetype: Archetype,
    pub style: Style,
    /// Common width of every grid tile
    pub tile_width: u32,
    /// Width of the hero tile, if the archetype has one
    pub hero_width: Option<u32>,
    /// Height of each grid row (tallest member)
    pub row_heights: Vec<u32>,
    /// Actual height of the whole stack from the scaled tiles
    pub stack_height: u32,
    /// Top of the stack on the canvas
    pub start_y: i64,
    /// Tiles in draw order: hero first, then rows top-down, left before right
    pub placements: Vec<Placement>,
}

impl LayoutPlan {
    pub fn hero(&self) -> Option<&Placement> {
        self.placements.iter().find(|p| p.role == TileRole::Hero)
    }

    /// Grid tiles only
    pub fn grid(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(|p| p.role != TileRole::Hero)
    }

    pub fn row_count(&self) -> usize {
        self.row_heights.len()
    }

    /// Bottom of the lowest tile
    pub fn stack_bottom(&self) -> i64 {
        self.start_y + i64::from(self.stack_height)
    }
}
