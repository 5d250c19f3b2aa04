//! Applying one page transform to many PDFs
//!
//! Every input is processed independently and written next to the others
//! in the output directory as `<stem><suffix>.pdf`.

mod transforms;

pub use transforms::{remove_pages, resize_pages, rotate_pages, trim_pages};

use crate::compose::io::{load_document, save_document};
use crate::constants::{REMOVE_SUFFIX, RESIZE_SUFFIX, ROTATE_SUFFIX, TRIM_SUFFIX};
use crate::range::PageRange;
use crate::types::*;
use lopdf::Document;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// A page edit applied to every page of a document
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Give every page a new size
    Resize { width: f32, height: f32, fit: PageFit },
    /// Cut points off the top and bottom of every page
    Trim { top: f32, bottom: f32 },
    /// Delete a page range, optionally resizing the pages that remain
    RemovePages {
        range: PageRange,
        resize_to: Option<(f32, f32)>,
        fit: PageFit,
    },
    Rotate(Rotation),
}

impl Transform {
    /// Resize with content scaled onto the new page
    pub fn resize(width: f32, height: f32) -> Self {
        Transform::Resize {
            width,
            height,
            fit: PageFit::ScaleContent,
        }
    }

    pub fn trim(top: f32, bottom: f32) -> Self {
        Transform::Trim { top, bottom }
    }

    /// Remove pages given as `<start>-<end>`, e.g. `"9-25"`
    pub fn remove_pages(range: &str) -> Result<Self> {
        Ok(Transform::RemovePages {
            range: PageRange::parse(range)?,
            resize_to: None,
            fit: PageFit::Boundary,
        })
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Transform::Resize { .. } => RESIZE_SUFFIX,
            Transform::Trim { .. } => TRIM_SUFFIX,
            Transform::RemovePages { .. } => REMOVE_SUFFIX,
            Transform::Rotate(_) => ROTATE_SUFFIX,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let positive_size = |width: f32, height: f32| {
            if width > 0.0 && height > 0.0 {
                Ok(())
            } else {
                Err(ComposeError::Config(format!(
                    "Page size must be positive, got {} x {}",
                    width, height
                )))
            }
        };

        match *self {
            Transform::Resize { width, height, .. } => positive_size(width, height),
            Transform::RemovePages {
                resize_to: Some((width, height)),
                ..
            } => positive_size(width, height),
            Transform::Trim { top, bottom } => {
                if top >= 0.0 && bottom >= 0.0 {
                    Ok(())
                } else {
                    Err(ComposeError::Config(format!(
                        "Trim amounts cannot be negative, got top {} and bottom {}",
                        top, bottom
                    )))
                }
            }
            Transform::RemovePages { resize_to: None, .. } | Transform::Rotate(_) => Ok(()),
        }
    }

    /// Where the result for `input` goes inside `output_dir`
    pub fn output_path(&self, input: &Path, output_dir: &Path) -> PathBuf {
        let mut name = input
            .file_stem()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("output"));
        name.push(self.suffix());
        name.push(".pdf");
        output_dir.join(name)
    }

    /// Apply the edit to every page of `doc`
    pub fn apply(&self, doc: &mut Document) -> Result<()> {
        match *self {
            Transform::Resize { width, height, fit } => resize_pages(doc, width, height, fit),
            Transform::Trim { top, bottom } => trim_pages(doc, top, bottom),
            Transform::RemovePages {
                range,
                resize_to,
                fit,
            } => {
                let removed = remove_pages(doc, range)?;
                log::debug!("Removed {} page(s) in {}-{}", removed, range.start(), range.end());
                match resize_to {
                    Some((width, height)) => resize_pages(doc, width, height, fit),
                    None => Ok(()),
                }
            }
            Transform::Rotate(step) => rotate_pages(doc, step),
        }
    }
}

/// Apply `transform` to one PDF and write the result to `output`
pub fn apply_transform(input: &Path, output: &Path, transform: &Transform) -> Result<()> {
    transform.validate()?;
    if SourceKind::from_path(input) != Some(SourceKind::Pdf) {
        return Err(ComposeError::UnsupportedKind(input.to_path_buf()));
    }

    let mut doc = load_document(input)?;
    if doc.get_pages().is_empty() {
        return Err(ComposeError::UnreadableSource {
            path: input.to_path_buf(),
            reason: "document has no pages".to_string(),
        });
    }
    transform.apply(&mut doc)?;
    save_document(&mut doc, output)
}

/// Apply `transform` to every input, writing results into `output_dir`.
///
/// Failing inputs are recorded and skipped. Invalid parameters, an empty
/// input list or an unusable output directory abort before any file is read.
pub fn run_batch(inputs: &[PathBuf], output_dir: &Path, transform: &Transform) -> Result<BatchResult> {
    if inputs.is_empty() {
        return Err(ComposeError::Config("no input files".to_string()));
    }
    transform.validate()?;
    if !output_dir.is_dir() {
        return Err(ComposeError::WriteFailure {
            path: output_dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let mut result = BatchResult::default();
    for input in inputs {
        let output = transform.output_path(input, output_dir);
        let outcome = apply_transform(input, &output, transform);
        if result.record(input, outcome).is_some() {
            log::info!("{} -> {}", input.display(), output.display());
            result.outputs.push(output);
        }
    }

    log::info!(
        "Batch finished: {} of {} file(s) written to {}",
        result.succeeded,
        result.attempted,
        output_dir.display()
    );
    Ok(result)
}

/// [`run_batch`] on the blocking thread pool
pub async fn run_batch_async(
    inputs: Vec<PathBuf>,
    output_dir: PathBuf,
    transform: Transform,
) -> Result<BatchResult> {
    tokio::task::spawn_blocking(move || run_batch(&inputs, &output_dir, &transform)).await?
}
