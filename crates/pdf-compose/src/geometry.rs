//! Contain-fit placement of raster images on a fixed canvas

use crate::constants::POINTS_PER_INCH;
use crate::types::*;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

/// Where a scaled image lands on the canvas, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub width: u32,
    pub height: u32,
    pub offset_x: u32,
    pub offset_y: u32,
    /// Resampling filter to use when scaling to `width` x `height`
    pub filter: FilterType,
}

/// Scale a `src_width` x `src_height` image to fit entirely inside the canvas,
/// preserving aspect ratio, and center it.
pub fn contain_fit(
    src_width: u32,
    src_height: u32,
    canvas_width: u32,
    canvas_height: u32,
) -> Result<Placement> {
    if src_width == 0 || src_height == 0 {
        return Err(ComposeError::InvalidGeometry(format!(
            "source image has zero dimension ({src_width} x {src_height})"
        )));
    }
    if canvas_width == 0 || canvas_height == 0 {
        return Err(ComposeError::InvalidGeometry(format!(
            "canvas has zero dimension ({canvas_width} x {canvas_height})"
        )));
    }

    let scale = (canvas_width as f64 / src_width as f64)
        .min(canvas_height as f64 / src_height as f64);

    // Rounding can never exceed the canvas on the limiting axis; clamp the
    // other axis anyway and keep at least one pixel.
    let width = ((src_width as f64 * scale).round() as u32).clamp(1, canvas_width);
    let height = ((src_height as f64 * scale).round() as u32).clamp(1, canvas_height);

    Ok(Placement {
        width,
        height,
        offset_x: (canvas_width - width) / 2,
        offset_y: (canvas_height - height) / 2,
        filter: FilterType::Lanczos3,
    })
}

/// Pixel size of the raster canvas for a page of the given size
pub fn canvas_pixels(canvas: &CanvasSpec) -> (u32, u32) {
    let pixels_per_point = canvas.dpi.map_or(1.0, |dpi| dpi as f32 / POINTS_PER_INCH);
    (
        ((canvas.width_pt * pixels_per_point).round() as u32).max(1),
        ((canvas.height_pt * pixels_per_point).round() as u32).max(1),
    )
}

/// Convert any color model to 8-bit RGB
pub fn normalize_color(image: DynamicImage) -> RgbImage {
    match image {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => other.to_rgb8(),
    }
}

/// Paste `image` contain-fitted and centered on a canvas filled with `background`
pub fn letterbox(image: &RgbImage, canvas_px: (u32, u32), background: [u8; 3]) -> Result<RgbImage> {
    let (canvas_width, canvas_height) = canvas_px;
    let placement = contain_fit(image.width(), image.height(), canvas_width, canvas_height)?;

    let mut canvas = RgbImage::from_pixel(canvas_width, canvas_height, Rgb(background));
    let resized = imageops::resize(image, placement.width, placement.height, placement.filter);
    imageops::replace(
        &mut canvas,
        &resized,
        i64::from(placement.offset_x),
        i64::from(placement.offset_y),
    );

    Ok(canvas)
}
