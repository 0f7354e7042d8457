//! Tile arrangement and drawing
//!
//! This module turns image dimensions into a [`LayoutPlan`] and draws a plan
//! onto the canvas:
//! - Sizing the grid tiles with the [`DimensionSolver`]
//! - Scaling every image to its tile width, keeping its aspect ratio
//! - Centering the stack vertically by the style's ratio
//! - Mirroring the two columns around the canvas centerline

use image::imageops::{self, FilterType};
use image::{Rgba, Rgba32FImage, RgbaImage};

use super::{DimensionSolver, LayoutPlan, Placement, TileRole};
use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::render::Compositor;
use crate::types::*;

/// Arranges and draws tiles for both archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutEngine {
    pub solver: DimensionSolver,
    pub compositor: Compositor,
}

impl LayoutEngine {
    pub fn new(solver: DimensionSolver, compositor: Compositor) -> Self {
        Self { solver, compositor }
    }

    /// Compute the layout for images of the given `(width, height)` sizes.
    pub fn plan(
        &self,
        sizes: &[(u32, u32)],
        style: &Style,
        archetype: Archetype,
    ) -> Result<LayoutPlan> {
        style.validate()?;
        if sizes.is_empty() {
            return Err(PosterError::Layout("no images to arrange".to_string()));
        }
        if let Some(index) = sizes.iter().position(|&(w, h)| w == 0 || h == 0) {
            return Err(PosterError::Layout(format!(
                "image {} has zero size {:?}",
                index, sizes[index]
            )));
        }

        let margin = style.margin;
        let tile_width = self.solver.max_tile_width(sizes, margin, archetype);
        if tile_width == 0 {
            return Err(PosterError::Layout(format!(
                "no tile width fits a margin of {margin}px"
            )));
        }
        let hero_width = archetype.hero_width(tile_width, margin);

        // Scaled size of every tile, in source order
        let scaled: Vec<(u32, u32)> = sizes
            .iter()
            .enumerate()
            .map(|(index, &size)| {
                let width = match hero_width {
                    Some(hero_width) if index == 0 => hero_width,
                    _ => tile_width,
                };
                (width, scaled_height(size, width))
            })
            .collect();

        let (hero, grid_start) = match hero_width {
            Some(_) => (Some(scaled[0]), 1),
            None => (None, 0),
        };
        let grid = &scaled[grid_start..];

        let row_heights: Vec<u32> = grid
            .chunks(2)
            .map(|pair| pair.iter().map(|&(_, h)| h).max().unwrap_or(0))
            .collect();

        let margin_64 = u64::from(margin);
        let mut stack_height: u64 = row_heights.iter().map(|&h| u64::from(h)).sum();
        stack_height += margin_64 * row_heights.len().saturating_sub(1) as u64;
        if let Some((_, hero_height)) = hero {
            stack_height += u64::from(hero_height) + margin_64;
        }

        let start_y = vertical_start(stack_height, style);

        let mut placements = Vec::with_capacity(scaled.len());
        let mut cursor = start_y;

        if let Some((width, height)) = hero {
            placements.push(Placement {
                source_index: 0,
                role: TileRole::Hero,
                row: None,
                x: (i64::from(CANVAS_WIDTH) - i64::from(width)).div_euclid(2),
                y: cursor,
                width,
                height,
            });
            cursor += i64::from(height) + i64::from(margin);
        }

        let center_x = i64::from(CANVAS_WIDTH / 2);
        let half_margin = i64::from(margin / 2);
        let left_x = center_x - i64::from(tile_width) - half_margin;
        let right_x = center_x + half_margin;

        for (row, (pair, &row_height)) in grid.chunks(2).zip(&row_heights).enumerate() {
            for (column, &(width, height)) in pair.iter().enumerate() {
                let (role, x) = if column == 0 {
                    (TileRole::Left, left_x)
                } else {
                    (TileRole::Right, right_x)
                };
                placements.push(Placement {
                    source_index: grid_start + row * 2 + column,
                    role,
                    row: Some(row),
                    x,
                    y: cursor,
                    width,
                    height,
                });
            }
            cursor += i64::from(row_height) + i64::from(margin);
        }

        let stack_height = u32::try_from(stack_height)
            .map_err(|_| PosterError::Layout(format!("stack height {stack_height} overflows")))?;

        log::debug!(
            "{} layout: tile {}px, hero {:?}, {} rows, stack {}px from y={}",
            archetype.name(),
            tile_width,
            hero_width,
            row_heights.len(),
            stack_height,
            start_y
        );

        Ok(LayoutPlan {
            archetype,
            style: *style,
            tile_width,
            hero_width,
            row_heights,
            stack_height,
            start_y,
            placements,
        })
    }

    /// Arrange `images` and draw them with their shadows onto `canvas`.
    ///
    /// Tiles are pasted in plan order: hero first, then each row left to right.
    pub fn compose(
        &self,
        canvas: &mut RgbaImage,
        images: &[RgbaImage],
        style: &Style,
        archetype: Archetype,
    ) -> Result<LayoutPlan> {
        let sizes: Vec<(u32, u32)> = images.iter().map(|image| image.dimensions()).collect();
        let plan = self.plan(&sizes, style, archetype)?;

        for placement in &plan.placements {
            let source = &images[placement.source_index];
            let tile = resample(source, placement.width, placement.height);
            self.compositor.paste(canvas, &tile, placement.x, placement.y);
        }

        Ok(plan)
    }
}

/// Resample `source` to `width` x `height` with a Lanczos3 filter.
///
/// Sources with any transparency are filtered in premultiplied alpha, so the
/// color hidden under fully transparent pixels never bleeds into visible edges.
pub fn resample(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if source.pixels().all(|pixel| pixel[3] == u8::MAX) {
        return imageops::resize(source, width, height, FilterType::Lanczos3);
    }

    let premultiplied = Rgba32FImage::from_fn(source.width(), source.height(), |x, y| {
        let Rgba([r, g, b, a]) = *source.get_pixel(x, y);
        let alpha = f32::from(a) / 255.0;
        let channel = |c: u8| f32::from(c) / 255.0 * alpha;
        Rgba([channel(r), channel(g), channel(b), alpha])
    });
    let resized = imageops::resize(&premultiplied, width, height, FilterType::Lanczos3);

    RgbaImage::from_fn(width, height, |x, y| {
        let Rgba([r, g, b, a]) = *resized.get_pixel(x, y);
        if a <= 0.0 {
            return Rgba([0, 0, 0, 0]);
        }
        let channel = |c: f32| ((c / a).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([
            channel(r),
            channel(g),
            channel(b),
            (a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ])
    })
}

/// Height of an image scaled to `target_width`, rounded, never below one pixel
pub fn scaled_height((width, height): (u32, u32), target_width: u32) -> u32 {
    let aspect = f64::from(width) / f64::from(height);
    let scaled = (f64::from(target_width) / aspect).round();
    (scaled as u32).max(1)
}

/// Top of the stack: the style's share of the empty space, but never closer
/// to the top edge than one margin
fn vertical_start(stack_height: u64, style: &Style) -> i64 {
    let empty_space = i64::from(CANVAS_HEIGHT) - stack_height as i64;
    let start_y = (empty_space as f64 * style.vertical_ratio) as i64;
    start_y.max(i64::from(style.margin))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: (u32, u32) = (100, 100);

    fn engine() -> LayoutEngine {
        LayoutEngine::default()
    }

    #[test]
    fn test_scaled_height_rounds() {
        assert_eq!(scaled_height((300, 200), 294), 196);
        assert_eq!(scaled_height((640, 480), 300), 225);
        assert_eq!(scaled_height((1000, 1), 10), 1);
    }

    #[test]
    fn test_top_grid_squares() {
        let plan = engine()
            .plan(&[SQUARE; 5], &Style::poster(), Archetype::TopGrid)
            .unwrap();

        assert_eq!(plan.tile_width, 350);
        assert_eq!(plan.hero_width, Some(750));
        assert_eq!(plan.row_heights, vec![350, 350]);
        assert_eq!(plan.stack_height, 1550);
        // 50 * 0.618 rounds down to 30, below the margin
        assert_eq!(plan.start_y, 50);

        let hero = plan.hero().unwrap();
        assert_eq!((hero.x, hero.y, hero.width, hero.height), (225, 50, 750, 750));

        let grid: Vec<_> = plan.grid().map(|p| (p.role, p.x, p.y)).collect();
        assert_eq!(
            grid,
            vec![
                (TileRole::Left, 225, 850),
                (TileRole::Right, 625, 850),
                (TileRole::Left, 225, 1250),
                (TileRole::Right, 625, 1250),
            ]
        );
    }

    #[test]
    fn test_sym_grid_has_no_hero() {
        let plan = engine()
            .plan(&[SQUARE; 6], &Style::dense(), Archetype::SymGrid)
            .unwrap();
        assert!(plan.hero().is_none());
        assert_eq!(plan.hero_width, None);
        assert_eq!(plan.row_count(), 3);
        assert_eq!(plan.tile_width, 501);
        assert_eq!(plan.start_y, 25);
    }

    #[test]
    fn test_columns_mirror_around_center() {
        let plan = engine()
            .plan(&[(400, 300); 6], &Style::dense(), Archetype::SymGrid)
            .unwrap();
        let left = plan.placements[0];
        let right = plan.placements[1];
        assert_eq!(left.width, right.width);
        // Gap of one margin (rounded down to even) between the columns
        assert_eq!(right.x - left.right(), 24);
        assert_eq!(600 - left.x, right.right() - 600);
    }

    #[test]
    fn test_stack_centered_when_short() {
        let plan = engine()
            .plan(&[(1000, 100); 6], &Style::dense(), Archetype::SymGrid)
            .unwrap();
        assert_eq!(plan.tile_width, 562);
        assert_eq!(plan.row_heights, vec![56, 56, 56]);
        assert_eq!(plan.stack_height, 218);
        assert_eq!(plan.start_y, (1600 - 218) / 2);
    }

    #[test]
    fn test_rows_use_tallest_member() {
        let sizes = [(300, 200), (200, 300), (400, 400), (300, 600), (640, 480)];
        let plan = engine()
            .plan(&sizes, &Style::poster(), Archetype::TopGrid)
            .unwrap();
        assert_eq!(plan.tile_width, 294);
        assert_eq!(plan.row_heights, vec![441, 588]);

        let hero = plan.hero().unwrap();
        assert_eq!((hero.width, hero.height), (638, 425));

        // Second row starts one margin below the taller first-row tile
        let second_row: Vec<_> = plan.grid().filter(|p| p.row == Some(1)).collect();
        assert_eq!(second_row[0].y, 525 + 441 + 50);
    }

    #[test]
    fn test_odd_grid_leaves_single_left_tile() {
        let plan = engine()
            .plan(&[SQUARE; 7], &Style::dense(), Archetype::SymGrid)
            .unwrap();
        let last = plan.placements.last().unwrap();
        assert_eq!(last.role, TileRole::Left);
        assert_eq!(last.row, Some(3));
        assert_eq!(plan.grid().filter(|p| p.row == Some(3)).count(), 1);
    }

    #[test]
    fn test_zero_sized_image_is_rejected() {
        let result = engine().plan(&[(0, 10), SQUARE], &Style::dense(), Archetype::SymGrid);
        assert!(matches!(result, Err(PosterError::Layout(_))));
    }

    #[test]
    fn test_invalid_style_is_rejected() {
        let style = Style {
            margin: 2_000_000_000,
            vertical_ratio: 0.5,
        };
        for archetype in [Archetype::SymGrid, Archetype::TopGrid] {
            let result = engine().plan(&[SQUARE; 6], &style, archetype);
            assert!(matches!(result, Err(PosterError::Config(_))));
        }
    }

    #[test]
    fn test_resample_hides_transparent_color() {
        // Opaque red on the left, fully transparent green on the right
        let source = RgbaImage::from_fn(8, 8, |x, _| {
            if x < 4 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 255, 0, 0])
            }
        });

        let tile = resample(&source, 20, 20);

        assert_eq!(tile.dimensions(), (20, 20));
        assert!(tile.get_pixel(2, 10)[3] >= 254);
        assert_eq!(tile.get_pixel(19, 10)[3], 0);
        for pixel in tile.pixels().filter(|pixel| pixel[3] > 0) {
            assert_eq!(pixel[1], 0, "green leaked into {pixel:?}");
        }
    }

    #[test]
    fn test_resample_opaque_matches_plain_resize() {
        let source =
            RgbaImage::from_fn(9, 7, |x, y| Rgba([(x * 25) as u8, (y * 30) as u8, 90, 255]));
        assert_eq!(
            resample(&source, 20, 15),
            imageops::resize(&source, 20, 15, FilterType::Lanczos3)
        );
    }

    #[test]
    fn test_compose_draws_every_tile() {
        let images: Vec<RgbaImage> = (0..6)
            .map(|i| RgbaImage::from_pixel(40, 30, Rgba([i * 40, 100, 200, 255])))
            .collect();
        let mut canvas = RgbaImage::new(CANVAS_WIDTH, CANVAS_HEIGHT);

        let plan = engine()
            .compose(&mut canvas, &images, &Style::dense(), Archetype::SymGrid)
            .unwrap();

        for placement in &plan.placements {
            let cx = (placement.x + i64::from(placement.width) / 2) as u32;
            let cy = (placement.y + i64::from(placement.height) / 2) as u32;
            let pixel = canvas.get_pixel(cx, cy);
            let expected = images[placement.source_index].get_pixel(0, 0)[0];
            assert!(pixel[3] >= 254);
            assert!((i16::from(pixel[0]) - i16::from(expected)).abs() <= 1);
        }
    }
}
