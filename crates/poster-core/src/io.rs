//! Image I/O for poster generation

use crate::types::*;
use image::{ImageError, ImageFormat, ImageReader, RgbaImage};
use std::io::{Cursor, Write};
use std::path::Path;

/// Load and decode a single image, converted to RGBA.
///
/// The format is detected from the file content, not the extension.
pub fn load_image(path: impl AsRef<Path>) -> Result<RgbaImage> {
    let path = path.as_ref();
    let decode_error = |source: ImageError| PosterError::Decode {
        path: path.to_owned(),
        source,
    };

    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_error(ImageError::IoError(e)))?;
    let image = reader.decode().map_err(decode_error)?;
    Ok(image.to_rgba8())
}

/// Load multiple images; the first failure aborts the whole load
pub fn load_images(paths: &[impl AsRef<Path>]) -> Result<Vec<RgbaImage>> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        images.push(load_image(path)?);
    }
    Ok(images)
}

/// Read only the dimensions of an image from its header
pub fn read_dimensions(path: impl AsRef<Path>) -> Result<(u32, u32)> {
    let path = path.as_ref();
    image::image_dimensions(path).map_err(|source| PosterError::Decode {
        path: path.to_owned(),
        source,
    })
}

/// Encode the canvas as PNG and write it to `path`.
///
/// The file is written to a temporary sibling first and renamed into place,
/// so `path` either holds the complete poster or is left untouched.
/// Returns the number of bytes written.
pub fn save_png(canvas: &RgbaImage, path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();

    let mut bytes = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staging = tempfile::Builder::new()
        .prefix(".poster-")
        .suffix(".png.part")
        .tempfile_in(dir)?;
    staging.write_all(&bytes)?;
    staging.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staging
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    staging.persist(path).map_err(|e| PosterError::Io(e.error))?;
    Ok(bytes.len() as u64)
}
