//! Turning one input file into canvas-sized pages
//!
//! - PDFs yield one page per source page, with the boundary redefined
//! - Images yield a single letterboxed raster page
//! - Office documents are converted to PDF first, when a converter is set

mod pdf;
mod raster;

use crate::convert::DocumentConverter;
use crate::options::ComposeOptions;
use crate::types::*;
use image::RgbImage;
use lopdf::{Document, ObjectId};
use std::path::Path;
use std::rc::Rc;

/// A page ready to be appended to the output document
#[derive(Debug)]
pub enum NormalizedPage {
    /// A page of a loaded source PDF, already fitted to the canvas
    Vector(VectorPage),
    /// A rendered canvas bitmap
    Raster(RasterPage),
}

#[derive(Debug)]
pub struct VectorPage {
    /// Source document, shared by all pages of one input
    pub source: Rc<Document>,
    pub page_id: ObjectId,
}

#[derive(Debug)]
pub struct RasterPage {
    pub image: RgbImage,
    pub width_pt: f32,
    pub height_pt: f32,
}

/// Converts source items to normalized pages for one merge run
pub struct PageAdapter<'a> {
    options: &'a ComposeOptions,
    scratch_dir: &'a Path,
}

impl<'a> PageAdapter<'a> {
    /// `scratch_dir` receives intermediate files such as converted office documents
    pub fn new(options: &'a ComposeOptions, scratch_dir: &'a Path) -> Self {
        Self {
            options,
            scratch_dir,
        }
    }

    pub fn adapt(&self, item: &SourceItem) -> Result<Vec<NormalizedPage>> {
        let path = item.path.as_path();
        if !path.exists() {
            return Err(ComposeError::MissingFile(path.to_path_buf()));
        }

        match item.kind {
            Some(SourceKind::Pdf) => pdf::adapt_pdf(path, self.options),
            Some(SourceKind::Image) => raster::adapt_image(path, &self.options.canvas),
            Some(SourceKind::Office) => match &self.options.converter {
                Some(converter) => self.adapt_office(path, converter.as_ref()),
                None => Err(ComposeError::UnsupportedKind(path.to_path_buf())),
            },
            None => Err(ComposeError::UnsupportedKind(path.to_path_buf())),
        }
    }

    fn adapt_office(&self, path: &Path, converter: &dyn DocumentConverter) -> Result<Vec<NormalizedPage>> {
        let pdf_path = converter.convert(path, self.scratch_dir)?;
        pdf::adapt_pdf(&pdf_path, self.options)
    }
}
