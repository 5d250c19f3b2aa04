//! Merging mixed inputs into one uniformly sized PDF

pub mod io;
mod output;

pub use output::OutputDocument;

use crate::adapter::PageAdapter;
use crate::options::ComposeOptions;
use crate::types::*;
use std::path::{Path, PathBuf};

/// Adapt every item in order and collect the resulting pages.
///
/// Items that fail are recorded in the returned [`BatchResult`] and skipped;
/// the run only fails as a whole when no page at all could be produced.
pub fn compose(items: &[SourceItem], options: &ComposeOptions) -> Result<(OutputDocument, BatchResult)> {
    options.validate()?;
    if items.is_empty() {
        return Err(ComposeError::Config("no input files".to_string()));
    }

    let scratch = tempfile::tempdir()?;
    let adapter = PageAdapter::new(options, scratch.path());
    let mut output = OutputDocument::new(options.jpeg_quality);
    let mut result = BatchResult::default();

    for item in items {
        let outcome = adapter.adapt(item).and_then(|pages| output.append(pages));
        if let Some(count) = result.record(&item.path, outcome) {
            log::info!("Added {} page(s) from {}", count, item.path.display());
        }
    }

    if let Err(e) = scratch.close() {
        log::warn!("Failed to remove scratch directory: {}", e);
    }

    if output.page_count() == 0 {
        return Err(ComposeError::EmptyResult(result.failures));
    }
    Ok((output, result))
}

/// Merge `items` into a single PDF at `destination`.
///
/// Nothing is written when every item fails.
pub fn merge_to_file(
    items: &[SourceItem],
    options: &ComposeOptions,
    destination: &Path,
) -> Result<BatchResult> {
    let (output, mut result) = compose(items, options)?;
    let pages = output.page_count();
    output.save(destination)?;

    log::info!(
        "Wrote {} page(s) to {} ({} of {} inputs)",
        pages,
        destination.display(),
        result.succeeded,
        result.attempted
    );
    result.outputs.push(destination.to_path_buf());
    Ok(result)
}

/// Convert a single image to a one-page PDF
pub fn image_to_pdf(image: &Path, options: &ComposeOptions, destination: &Path) -> Result<BatchResult> {
    let item = SourceItem::new(image);
    if item.kind != Some(SourceKind::Image) {
        return Err(ComposeError::UnsupportedKind(image.to_path_buf()));
    }
    merge_to_file(std::slice::from_ref(&item), options, destination)
}

/// [`merge_to_file`] on the blocking thread pool
pub async fn merge_to_file_async(
    items: Vec<SourceItem>,
    options: ComposeOptions,
    destination: PathBuf,
) -> Result<BatchResult> {
    tokio::task::spawn_blocking(move || merge_to_file(&items, &options, &destination)).await?
}
