use super::{NormalizedPage, RasterPage};
use crate::constants::BACKGROUND_RGB;
use crate::geometry::{canvas_pixels, letterbox, normalize_color};
use crate::types::*;
use std::path::Path;

pub(super) fn adapt_image(path: &Path, canvas: &CanvasSpec) -> Result<Vec<NormalizedPage>> {
    let decoded = image::open(path).map_err(|e| ComposeError::UnreadableSource {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let (src_width, src_height) = (decoded.width(), decoded.height());
    let rgb = normalize_color(decoded);
    let canvas_px = canvas_pixels(canvas);
    let page_image = letterbox(&rgb, canvas_px, BACKGROUND_RGB)?;

    log::debug!(
        "{}: {}x{} image placed on {}x{} px canvas",
        path.display(),
        src_width,
        src_height,
        canvas_px.0,
        canvas_px.1
    );

    Ok(vec![NormalizedPage::Raster(RasterPage {
        image: page_image,
        width_pt: canvas.width_pt,
        height_pt: canvas.height_pt,
    })])
}
