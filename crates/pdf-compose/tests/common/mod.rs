#![allow(dead_code)]

use image::{Rgb, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::path::{Path, PathBuf};

/// Build a PDF whose pages draw the text `<label> <n>`
pub fn create_test_pdf(label: &str, num_pages: usize, width: i64, height: i64) -> Document {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for i in 0..num_pages {
        let content = format!("BT /F1 12 Tf 50 50 Td ({} {}) Tj ET", label, i + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(width),
                    Object::Integer(height),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

pub fn write_pdf(dir: &Path, name: &str, mut doc: Document) -> PathBuf {
    let path = dir.join(name);
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    std::fs::write(&path, writer).unwrap();
    path
}

pub fn write_test_pdf(dir: &Path, name: &str, num_pages: usize, width: i64, height: i64) -> PathBuf {
    let label = name.trim_end_matches(".pdf");
    write_pdf(dir, name, create_test_pdf(label, num_pages, width, height))
}

pub fn write_test_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([200, 30, 30]))
        .save(&path)
        .unwrap();
    path
}

pub fn load(path: &Path) -> Document {
    Document::load(path).unwrap()
}

pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

pub fn page_text(doc: &Document, page_id: ObjectId) -> String {
    String::from_utf8_lossy(&doc.get_page_content(page_id).unwrap()).into_owned()
}

/// True when the page is a full-page image placed by the image adapter
pub fn is_image_page(doc: &Document, page_id: ObjectId) -> bool {
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = match page.get(b"Resources") {
        Ok(Object::Dictionary(dict)) => dict,
        _ => return false,
    };
    matches!(resources.get(b"XObject"), Ok(Object::Dictionary(x)) if x.has(b"Im0"))
}

pub fn number(obj: &Object) -> f32 {
    match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        other => panic!("not a number: {:?}", other),
    }
}

/// The page's own box entry, without inheritance
pub fn own_box(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<[f32; 4]> {
    let page = doc.get_dictionary(page_id).unwrap();
    let arr = page.get(key).ok()?.as_array().ok()?;
    Some([number(&arr[0]), number(&arr[1]), number(&arr[2]), number(&arr[3])])
}
