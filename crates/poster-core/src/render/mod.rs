//! Pixel operations for poster composition
//!
//! This module handles everything that touches pixels:
//! - Rendering blurred drop shadows for tiles
//! - Alpha-compositing tiles and their shadows onto the canvas

mod composite;
mod shadow;

pub use composite::*;
pub use shadow::*;
