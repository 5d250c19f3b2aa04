//! Document I/O for composition and batch transforms

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Load a PDF, mapping failures to the input-level error kinds
pub fn load_document(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(ComposeError::MissingFile(path.to_path_buf()));
    }
    let unreadable = |reason: String| ComposeError::UnreadableSource {
        path: path.to_path_buf(),
        reason,
    };

    let bytes = std::fs::read(path).map_err(|e| unreadable(e.to_string()))?;
    Document::load_mem(&bytes).map_err(|e| unreadable(e.to_string()))
}

/// Serialize `doc` and write it to `path`
///
/// The document is serialized fully before the file is touched, so a
/// serialization error never leaves a partial file behind.
pub fn save_document(doc: &mut Document, path: &Path) -> Result<()> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    std::fs::write(path, bytes).map_err(|source| ComposeError::WriteFailure {
        path: path.to_path_buf(),
        source,
    })
}

/// Async variant of [`load_document`] for callers already on a tokio runtime
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    tokio::task::spawn_blocking(move || load_document(&path)).await?
}
