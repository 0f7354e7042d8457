//! Poster generation entry point
//!
//! This module orchestrates one generation:
//! 1. Check the image count and pick style + archetype
//! 2. Decode every source image to RGBA
//! 3. Arrange and draw the tiles on a fresh canvas
//! 4. Write the finished canvas as PNG

use crate::constants::*;
use crate::io::{load_images, read_dimensions, save_png};
use crate::layout::{DimensionSolver, LayoutEngine, LayoutPlan};
use crate::options::EngineConfig;
use crate::render::Compositor;
use crate::types::*;
use image::{Rgba, RgbaImage};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

/// Pick the style preset and archetype for `count` images.
///
/// Five images get the poster style with a hero tile. Larger batches use the
/// dense style: a pure grid for even counts, hero plus grid for odd counts.
pub fn select_layout(count: usize) -> Result<(StyleKind, Archetype)> {
    if count < MIN_IMAGES {
        return Err(PosterError::InsufficientImages { count });
    }

    Ok(if count == POSTER_STYLE_COUNT {
        (StyleKind::Poster, Archetype::TopGrid)
    } else if count % 2 == 0 {
        (StyleKind::Dense, Archetype::SymGrid)
    } else {
        (StyleKind::Dense, Archetype::TopGrid)
    })
}

/// A composed poster held in memory
#[derive(Debug, Clone)]
pub struct Poster {
    pub canvas: RgbaImage,
    pub style: StyleKind,
    pub plan: LayoutPlan,
}

/// Builds posters from batches of images
#[derive(Debug, Clone, Copy)]
pub struct PosterService {
    config: EngineConfig,
    engine: LayoutEngine,
}

impl Default for PosterService {
    fn default() -> Self {
        Self::from_valid_config(EngineConfig::default())
    }
}

impl PosterService {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EngineConfig) -> Self {
        let engine = LayoutEngine::new(
            DimensionSolver::new(config.solver),
            Compositor::new(config.shadow),
        );
        Self { config, engine }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compose a poster from already-decoded images.
    pub fn render(&self, images: &[RgbaImage]) -> Result<Poster> {
        let (kind, archetype) = select_layout(images.len())?;
        let style = self.config.style(kind);

        let mut canvas = RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, Rgba(BACKGROUND_RGBA));
        let plan = contain_panics(|| self.engine.compose(&mut canvas, images, style, archetype))?;

        Ok(Poster {
            canvas,
            style: kind,
            plan,
        })
    }

    /// Compute the layout for the images at `paths` from their headers alone.
    pub fn plan_paths(&self, paths: &[impl AsRef<Path>]) -> Result<(StyleKind, LayoutPlan)> {
        let (kind, archetype) = select_layout(paths.len())?;
        let sizes = paths
            .iter()
            .map(read_dimensions)
            .collect::<Result<Vec<_>>>()?;
        let plan = self
            .engine
            .plan(&sizes, self.config.style(kind), archetype)?;
        Ok((kind, plan))
    }

    /// Generate one poster from the images at `paths` and write it to `output`.
    ///
    /// Nothing is written unless every image decodes and the canvas is fully
    /// composed; on success the destination holds a complete PNG.
    pub fn generate(
        &self,
        paths: &[impl AsRef<Path>],
        output: impl AsRef<Path>,
    ) -> Result<PosterReport> {
        let output = output.as_ref();
        let count = paths.len();
        select_layout(count)?;

        // Decoded images are released as soon as the canvas is composed
        let poster = contain_panics(|| {
            let images = load_images(paths)?;
            self.render(&images)
        })?;

        let bytes_written = save_png(&poster.canvas, output)?;

        log::info!(
            "Generated {} poster ({} images, {}, tile {}px) → {}",
            poster.style.name(),
            count,
            poster.plan.archetype.name(),
            poster.plan.tile_width,
            output.display()
        );

        Ok(PosterReport {
            output: output.to_owned(),
            image_count: count,
            style: poster.style,
            plan: poster.plan,
            bytes_written,
        })
    }
}

/// Run `f`, turning a panic into [`PosterError::Internal`]
fn contain_panics<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(PosterError::Internal(message))
    })
}

/// Generate a poster with the default configuration, reporting only success.
///
/// The failure reason is logged.
pub fn generate_poster_image(paths: &[impl AsRef<Path>], output: impl AsRef<Path>) -> bool {
    match PosterService::default().generate(paths, output) {
        Ok(_) => true,
        Err(e) => {
            log::warn!("Poster generation failed: {e}");
            false
        }
    }
}

/// Generate a poster on tokio's blocking pool
pub async fn generate_async(
    service: PosterService,
    paths: Vec<PathBuf>,
    output: PathBuf,
) -> Result<PosterReport> {
    tokio::task::spawn_blocking(move || service.generate(&paths, &output)).await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_rule() {
        assert_eq!(
            select_layout(5).unwrap(),
            (StyleKind::Poster, Archetype::TopGrid)
        );
        assert_eq!(
            select_layout(6).unwrap(),
            (StyleKind::Dense, Archetype::SymGrid)
        );
        assert_eq!(
            select_layout(7).unwrap(),
            (StyleKind::Dense, Archetype::TopGrid)
        );
        assert_eq!(
            select_layout(10).unwrap(),
            (StyleKind::Dense, Archetype::SymGrid)
        );
    }

    #[test]
    fn test_routing_rejects_small_batches() {
        for count in 0..MIN_IMAGES {
            assert!(matches!(
                select_layout(count),
                Err(PosterError::InsufficientImages { count: c }) if c == count
            ));
        }
    }

    #[test]
    fn test_contain_panics() {
        let result: Result<()> = contain_panics(|| panic!("tile math went wrong"));
        match result {
            Err(PosterError::Internal(message)) => assert_eq!(message, "tile math went wrong"),
            other => panic!("Expected Internal error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            poster: Style {
                margin: 50,
                vertical_ratio: -0.1,
            },
            ..Default::default()
        };
        assert!(PosterService::new(config).is_err());
    }
}
