pub mod constants;
mod io;
pub mod layout;
mod options;
pub mod render;
mod service;
mod types;

pub use io::{load_image, load_images, read_dimensions, save_png};
pub use layout::{LayoutEngine, LayoutPlan, Placement, SolverMode, TileRole};
pub use options::*;
pub use service::*;
pub use types::*;
