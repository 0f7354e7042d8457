//! Layout calculation for poster composition
//!
//! This module handles all the geometric calculations for a poster:
//! - Tile width sizing (how wide a grid tile can be without overflowing)
//! - Tile arrangement (hero tile, two-column rows, vertical centering)

mod engine;
mod solver;
mod types;

pub use engine::*;
pub use solver::*;
pub use types::*;
