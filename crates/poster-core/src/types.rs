use crate::constants::*;
use crate::layout::LayoutPlan;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosterError {
    #[error("At least {min} images are required, got {count}", min = MIN_IMAGES)]
    InsufficientImages { count: usize },
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Encode error: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Layout error: {0}")]
    Layout(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, PosterError>;

/// Grid shape of a poster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Archetype {
    /// One full-width hero tile above a two-column grid
    TopGrid,
    /// Pure two-column grid
    SymGrid,
}

impl Archetype {
    /// Whether the first image is drawn as a hero tile
    pub fn has_hero(self) -> bool {
        matches!(self, Archetype::TopGrid)
    }

    /// Width of the hero tile for a given grid tile width, if there is one.
    /// The hero spans both columns and the gap between them.
    pub fn hero_width(self, tile_width: u32, margin: u32) -> Option<u32> {
        self.has_hero()
            .then(|| tile_width.saturating_mul(2).saturating_add(margin))
    }

    pub fn name(self) -> &'static str {
        match self {
            Archetype::TopGrid => "top-grid",
            Archetype::SymGrid => "sym-grid",
        }
    }
}

/// Named style presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StyleKind {
    /// Generous margins, stack sits below center
    Poster,
    /// Tight margins, stack centered
    Dense,
}

impl StyleKind {
    pub fn name(self) -> &'static str {
        match self {
            StyleKind::Poster => "poster",
            StyleKind::Dense => "dense",
        }
    }
}

/// Spacing and vertical placement of a poster
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Gap between tiles and minimum distance from the canvas edge, in pixels
    pub margin: u32,
    /// Fraction of the unused vertical space placed above the stack
    pub vertical_ratio: f64,
}

impl Style {
    pub fn poster() -> Self {
        Self {
            margin: POSTER_MARGIN,
            vertical_ratio: POSTER_VERTICAL_RATIO,
        }
    }

    pub fn dense() -> Self {
        Self {
            margin: DENSE_MARGIN,
            vertical_ratio: DENSE_VERTICAL_RATIO,
        }
    }

    /// Validate the style against the fixed canvas
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.vertical_ratio) {
            return Err(PosterError::Config(format!(
                "vertical ratio must be within [0, 1], got {}",
                self.vertical_ratio
            )));
        }

        // Two columns need three margins of horizontal room plus at least a pixel each
        if u64::from(self.margin) * 3 + 2 > u64::from(CANVAS_WIDTH) {
            return Err(PosterError::Config(format!(
                "margin {} leaves no room for two columns on a {}px canvas",
                self.margin, CANVAS_WIDTH
            )));
        }

        Ok(())
    }
}

/// Drop shadow look, applied identically to every tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShadowSpec {
    /// Gaussian blur radius (sigma), in pixels
    pub blur_radius: u32,
    /// Offset of the shadow from its tile (x, y)
    pub offset: (i64, i64),
    /// Shadow alpha before blurring
    pub opacity: u8,
    /// Shadow color (RGB)
    pub color: [u8; 3],
}

impl Default for ShadowSpec {
    fn default() -> Self {
        Self {
            blur_radius: SHADOW_BLUR_RADIUS,
            offset: SHADOW_OFFSET,
            opacity: SHADOW_OPACITY,
            color: SHADOW_COLOR,
        }
    }
}

impl ShadowSpec {
    /// Transparent border added on every side of a shadow bitmap so the blur does not clip
    pub fn padding(&self) -> u32 {
        self.blur_radius * SHADOW_PADDING_FACTOR
    }
}

/// Summary of one successful generation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PosterReport {
    /// Where the poster was written
    pub output: PathBuf,
    /// Number of source images
    pub image_count: usize,
    /// Style preset used
    pub style: StyleKind,
    /// The layout that was drawn
    pub plan: LayoutPlan,
    /// Size of the PNG file in bytes
    pub bytes_written: u64,
}
