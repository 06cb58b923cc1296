//! PNG export of rendered frames.

use crate::PlotError;
use crate::surface::{PixelBuffer, Surface};
use image::{ImageBuffer, Rgba};
use std::path::Path;

/// Encodes `pixels` as a PNG at `path`.
pub fn save_png(pixels: &PixelBuffer, path: &Path) -> Result<(), PlotError> {
    let expected = pixels.width as usize * pixels.height as usize * 4;
    if pixels.rgba.len() != expected {
        let message = format!(
            "pixel buffer holds {} bytes, expected {expected} for {}x{}",
            pixels.rgba.len(),
            pixels.width,
            pixels.height
        );
        log::error!("{message}");
        return Err(PlotError::Readback(message));
    }

    let image = ImageBuffer::<Rgba<u8>, _>::from_raw(pixels.width, pixels.height, &pixels.rgba[..])
        .ok_or_else(|| PlotError::Readback("pixel buffer does not match its size".to_string()))?;

    image.save(path).map_err(|source| {
        log::error!("failed to save {}: {source}", path.display());
        PlotError::Encode {
            path: path.to_path_buf(),
            source,
        }
    })?;

    log::info!("saved {}", path.display());
    Ok(())
}

/// Reads back the last presented frame of `surface` and saves it as a PNG.
pub fn save_frame(surface: &impl Surface, path: &Path) -> Result<(), PlotError> {
    let pixels = surface.read_pixels().inspect_err(|err| {
        log::error!("cannot save {}: {err}", path.display());
    })?;
    save_png(&pixels, path)
}
