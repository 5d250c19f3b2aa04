//! Per-document page edits used by the batch runner

use crate::range::PageRange;
use crate::render::{fit_page, materialize_inherited, media_box, rotation, set_page_box, set_rotation};
use crate::types::*;
use lopdf::{Document, ObjectId};

fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// Give every page a `width` x `height` size
pub fn resize_pages(doc: &mut Document, width: f32, height: f32, fit: PageFit) -> Result<()> {
    for page_id in page_ids(doc) {
        materialize_inherited(doc, page_id)?;
        fit_page(doc, page_id, width, height, fit)?;
    }
    Ok(())
}

/// Cut `top` points off the top and `bottom` points off the bottom of every page
pub fn trim_pages(doc: &mut Document, top: f32, bottom: f32) -> Result<()> {
    for page_id in page_ids(doc) {
        let [llx, lly, urx, ury] = media_box(doc, page_id);
        let trimmed = [llx, lly + bottom, urx, ury - top];
        if trimmed[3] <= trimmed[1] {
            return Err(ComposeError::Config(format!(
                "Trimming {} pt top and {} pt bottom leaves no page (height {})",
                top,
                bottom,
                ury - lly
            )));
        }

        log::debug!("Page {:?}: {:?} -> {:?}", page_id, [llx, lly, urx, ury], trimmed);
        set_page_box(doc, page_id, "MediaBox", trimmed)?;
        set_page_box(doc, page_id, "CropBox", trimmed)?;
    }
    Ok(())
}

/// Delete the pages in `range`; numbers past the end of the document are ignored.
///
/// Returns the number of pages deleted.
pub fn remove_pages(doc: &mut Document, range: PageRange) -> Result<usize> {
    let page_count = doc.get_pages().len() as u32;
    let doomed = range.existing_pages(page_count);
    if !doomed.is_empty() && doomed.len() as u32 == page_count {
        return Err(ComposeError::EmptyResult(Vec::new()));
    }

    doc.delete_pages(&doomed);
    Ok(doomed.len())
}

/// Add `step` to the effective rotation of every page
pub fn rotate_pages(doc: &mut Document, step: Rotation) -> Result<()> {
    for page_id in page_ids(doc) {
        let current = rotation(doc, page_id);
        set_rotation(doc, page_id, current + step.degrees())?;
    }
    Ok(())
}
