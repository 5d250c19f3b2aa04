use super::{NormalizedPage, VectorPage};
use crate::compose::io::load_document;
use crate::options::ComposeOptions;
use crate::render::{fit_page, materialize_inherited};
use crate::types::*;
use lopdf::ObjectId;
use std::path::Path;
use std::rc::Rc;

pub(super) fn adapt_pdf(path: &Path, options: &ComposeOptions) -> Result<Vec<NormalizedPage>> {
    let mut doc = load_document(path)?;

    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    if page_ids.is_empty() {
        return Err(ComposeError::UnreadableSource {
            path: path.to_path_buf(),
            reason: "document has no pages".to_string(),
        });
    }

    let canvas = &options.canvas;
    for &page_id in &page_ids {
        materialize_inherited(&mut doc, page_id)?;
        fit_page(
            &mut doc,
            page_id,
            canvas.width_pt,
            canvas.height_pt,
            options.page_fit,
        )?;
    }

    log::debug!(
        "{}: {} page(s) fitted to {} x {} ({:?})",
        path.display(),
        page_ids.len(),
        canvas.width_pt,
        canvas.height_pt,
        options.page_fit
    );

    let source = Rc::new(doc);
    Ok(page_ids
        .into_iter()
        .map(|page_id| {
            NormalizedPage::Vector(VectorPage {
                source: Rc::clone(&source),
                page_id,
            })
        })
        .collect())
}
