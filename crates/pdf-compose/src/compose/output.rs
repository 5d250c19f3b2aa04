//! The output document being assembled by a merge

use super::io::save_document;
use crate::adapter::{NormalizedPage, RasterPage, VectorPage};
use crate::render::{add_image_page, copy_dictionary};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

/// Pages collected so far, in append order
pub struct OutputDocument {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    jpeg_quality: u8,
}

impl OutputDocument {
    pub fn new(jpeg_quality: u8) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            kids: Vec::new(),
            jpeg_quality,
        }
    }

    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Append the pages of one input.
    ///
    /// Either every page is appended or none is; objects written for a
    /// partially appended input are discarded again.
    pub fn append(&mut self, pages: Vec<NormalizedPage>) -> Result<usize> {
        let checkpoint = self.doc.max_id;
        match self.stage(pages) {
            Ok(staged) => {
                let count = staged.len();
                self.kids.extend(staged.into_iter().map(Object::Reference));
                Ok(count)
            }
            Err(e) => {
                self.doc.objects.retain(|id, _| id.0 <= checkpoint);
                self.doc.max_id = checkpoint;
                Err(e)
            }
        }
    }

    fn stage(&mut self, pages: Vec<NormalizedPage>) -> Result<Vec<ObjectId>> {
        // Page ids are allocated up front so links between appended pages survive the copy
        let mut caches: Vec<(Rc<Document>, HashMap<ObjectId, ObjectId>)> = Vec::new();
        let mut planned = Vec::with_capacity(pages.len());
        for page in pages {
            match page {
                NormalizedPage::Vector(vector) => {
                    let new_id = self.doc.new_object_id();
                    let slot = match caches.iter().position(|(src, _)| Rc::ptr_eq(src, &vector.source)) {
                        Some(slot) => slot,
                        None => {
                            caches.push((Rc::clone(&vector.source), HashMap::new()));
                            caches.len() - 1
                        }
                    };
                    caches[slot].1.insert(vector.page_id, new_id);
                    planned.push(Planned::Vector { page: vector, new_id, slot });
                }
                NormalizedPage::Raster(raster) => planned.push(Planned::Raster(raster)),
            }
        }

        let mut staged = Vec::with_capacity(planned.len());
        for entry in planned {
            let id = match entry {
                Planned::Vector { page, new_id, slot } => {
                    self.copy_page(&page, new_id, &mut caches[slot].1)?;
                    new_id
                }
                Planned::Raster(raster) => add_image_page(
                    &mut self.doc,
                    &raster.image,
                    self.jpeg_quality,
                    raster.width_pt,
                    raster.height_pt,
                    self.pages_id,
                )?,
            };
            staged.push(id);
        }
        Ok(staged)
    }

    fn copy_page(
        &mut self,
        page: &VectorPage,
        new_id: ObjectId,
        cache: &mut HashMap<ObjectId, ObjectId>,
    ) -> Result<()> {
        let mut source_dict = page.source.get_dictionary(page.page_id)?.clone();
        source_dict.remove(b"Parent");

        let mut dict = copy_dictionary(&mut self.doc, &page.source, &source_dict, cache)?;
        dict.set("Parent", Object::Reference(self.pages_id));
        self.doc.objects.insert(new_id, Object::Dictionary(dict));
        Ok(())
    }

    /// Finish the page tree and catalog
    pub fn into_document(mut self) -> Result<Document> {
        if self.kids.is_empty() {
            return Err(ComposeError::EmptyResult(Vec::new()));
        }

        let count = self.kids.len() as i64;
        let pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.kids)),
            ("Count", Object::Integer(count)),
        ]);
        self.doc.objects.insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));
        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        Ok(self.doc)
    }

    /// Finish the document and write it to `path`
    pub fn save(self, path: &Path) -> Result<()> {
        let mut doc = self.into_document()?;
        save_document(&mut doc, path)
    }
}

enum Planned {
    Vector {
        page: VectorPage,
        new_id: ObjectId,
        slot: usize,
    },
    Raster(RasterPage),
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn raster(width_pt: f32, height_pt: f32) -> NormalizedPage {
        NormalizedPage::Raster(RasterPage {
            image: RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30])),
            width_pt,
            height_pt,
        })
    }

    #[test]
    fn test_empty_output_is_empty_result() {
        let output = OutputDocument::new(90);
        assert!(matches!(output.into_document(), Err(ComposeError::EmptyResult(_))));
    }

    #[test]
    fn test_append_raster_pages_in_order() {
        let mut output = OutputDocument::new(90);
        assert_eq!(output.append(vec![raster(100.0, 200.0)]).unwrap(), 1);
        assert_eq!(output.append(vec![raster(300.0, 400.0)]).unwrap(), 1);
        assert_eq!(output.page_count(), 2);

        let doc = output.into_document().unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 2);
        let first = crate::render::page_dimensions(&doc, pages[&1]);
        let second = crate::render::page_dimensions(&doc, pages[&2]);
        assert_eq!(first, (100.0, 200.0));
        assert_eq!(second, (300.0, 400.0));
    }

    #[test]
    fn test_failed_append_leaves_no_objects() {
        let mut output = OutputDocument::new(90);
        output.append(vec![raster(100.0, 100.0)]).unwrap();
        let objects_before = output.doc.objects.len();

        let mut broken = Document::with_version("1.7");
        let missing_page = broken.new_object_id();
        let pages = vec![
            raster(100.0, 100.0),
            NormalizedPage::Vector(VectorPage {
                source: Rc::new(broken),
                page_id: missing_page,
            }),
        ];
        assert!(output.append(pages).is_err());
        assert_eq!(output.doc.objects.len(), objects_before);
        assert_eq!(output.page_count(), 1);
    }
}
