//! Drop shadow rendering
//!
//! A shadow is a tile-sized rectangle, inset slightly so the blur does not
//! leave a hard edge at the tile boundary, filled with the shadow color at
//! the shadow opacity and Gaussian-blurred inside a padded bitmap.

use image::{Rgba, RgbaImage, imageops};

use crate::constants::SHADOW_SHRINK;
use crate::types::ShadowSpec;

/// Produces shadow bitmaps for tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShadowRenderer {
    pub spec: ShadowSpec,
}

impl ShadowRenderer {
    pub fn new(spec: ShadowSpec) -> Self {
        Self { spec }
    }

    /// Render the shadow for a tile of `(width, height)`.
    ///
    /// The result is `padding` pixels larger than the tile on every side,
    /// where `padding` is [`ShadowSpec::padding`].
    pub fn render(&self, (width, height): (u32, u32)) -> RgbaImage {
        let padding = self.spec.padding();
        let [r, g, b] = self.spec.color;

        // Transparent pixels carry the shadow color so the blur does not pull in black
        let mut bitmap = RgbaImage::from_pixel(
            width + padding * 2,
            height + padding * 2,
            Rgba([r, g, b, 0]),
        );

        if width == 0 || height == 0 {
            return bitmap;
        }

        // Inclusive bounds, inset on each edge
        let x0 = padding + SHADOW_SHRINK;
        let y0 = padding + SHADOW_SHRINK;
        let x1 = (padding + width).saturating_sub(SHADOW_SHRINK).min(bitmap.width() - 1);
        let y1 = (padding + height).saturating_sub(SHADOW_SHRINK).min(bitmap.height() - 1);

        let fill = Rgba([r, g, b, self.spec.opacity]);
        for y in y0..=y1 {
            for x in x0..=x1 {
                bitmap.put_pixel(x, y, fill);
            }
        }

        if self.spec.blur_radius == 0 {
            return bitmap;
        }
        imageops::blur(&bitmap, self.spec.blur_radius as f32)
    }
}
