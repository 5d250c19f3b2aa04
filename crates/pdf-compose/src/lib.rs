//! Merging PDFs, images and office documents into uniformly sized PDFs,
//! plus batch page edits (resize, trim, page removal, rotation).

pub mod adapter;
pub mod batch;
pub mod compose;
pub mod constants;
pub mod convert;
pub mod geometry;
mod options;
pub mod range;
pub mod render;
mod session;
mod types;

pub use batch::{Transform, apply_transform, run_batch, run_batch_async};
pub use compose::io::{load_document, load_pdf, save_document};
pub use compose::{OutputDocument, compose, image_to_pdf, merge_to_file, merge_to_file_async};
pub use convert::{DocumentConverter, LibreOfficeConverter, convert_in_place};
pub use options::*;
pub use range::PageRange;
pub use session::Session;
pub use types::*;
