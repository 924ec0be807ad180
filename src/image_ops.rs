//! Image processing operations.

use std::io::Cursor;
use std::path::Path;

use clap::ValueEnum;
use image::{DynamicImage, GenericImageView, ImageFormat};
use tracing::debug;

use crate::error::{Result, ThemeError};

/// Strategy for resizing a background to the theme canvas.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ResizeStrategy {
    /// Fit within the canvas, keep aspect ratio (black bars).
    Fit,
    /// Fill the canvas, keep aspect ratio (crops).
    Fill,
    /// Stretch to the canvas (may distort).
    #[default]
    Stretch,
}

/// Resize an image to exactly `width` x `height` using `strategy`.
pub fn resize_to_canvas(
    img: &DynamicImage,
    width: u32,
    height: u32,
    strategy: ResizeStrategy,
) -> DynamicImage {
    let filter = image::imageops::FilterType::Lanczos3;

    match strategy {
        ResizeStrategy::Fit => {
            let resized = img.resize(width, height, filter).to_rgb8();
            let mut canvas = image::RgbImage::new(width, height);

            let (rw, rh) = resized.dimensions();
            let x = (width - rw) / 2;
            let y = (height - rh) / 2;

            image::imageops::overlay(&mut canvas, &resized, x.into(), y.into());
            DynamicImage::ImageRgb8(canvas)
        }
        ResizeStrategy::Fill => img.resize_to_fill(width, height, filter),
        ResizeStrategy::Stretch => img.resize_exact(width, height, filter),
    }
}

/// Decode an image file.
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    if !path.exists() {
        return Err(ThemeError::not_found(path));
    }
    image::open(path).map_err(|e| ThemeError::ImageProcessing(format!("{}: {e}", path.display())))
}

/// Pixel dimensions of an image file, read from its header.
pub fn image_dimensions(path: &Path) -> Result<(u32, u32)> {
    if !path.exists() {
        return Err(ThemeError::not_found(path));
    }
    image::image_dimensions(path)
        .map_err(|e| ThemeError::ImageProcessing(format!("{}: {e}", path.display())))
}

/// Solid black canvas.
pub fn black_canvas(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(image::RgbImage::new(width, height))
}

/// Preview size for a `width` x `height` source scaled to `preview_width`.
///
/// The height is truncated, never below one pixel.
pub fn preview_size(width: u32, height: u32, preview_width: u32) -> (u32, u32) {
    if width == 0 {
        return (preview_width, 1);
    }
    let scale = f64::from(preview_width) / f64::from(width);
    let scaled = (f64::from(height) * scale) as u32;
    (preview_width, scaled.max(1))
}

/// Downscale `img` to `preview_width`, keeping the aspect ratio, as PNG bytes.
pub fn make_preview(img: &DynamicImage, preview_width: u32) -> Result<Vec<u8>> {
    let (width, height) = img.dimensions();
    let (pw, ph) = preview_size(width, height, preview_width);
    debug!(width, height, preview_width = pw, preview_height = ph, "Generating preview");

    let preview = img.resize_exact(pw, ph, image::imageops::FilterType::Triangle);
    encode_png(&preview)
}

/// Encode an image as PNG.
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| ThemeError::ImageProcessing(e.to_string()))?;
    Ok(bytes)
}
