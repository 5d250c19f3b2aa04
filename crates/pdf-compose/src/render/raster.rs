//! Embedding raster images as full-page image XObjects

use crate::constants::PAGE_IMAGE_NAME;
use crate::types::Result;
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Encode `image` as JPEG and add it to `output` as an image XObject
pub fn add_image_xobject(output: &mut Document, image: &RgbImage, quality: u8) -> Result<ObjectId> {
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality).encode_image(image)?;

    let dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(i64::from(image.width()))),
        ("Height", Object::Integer(i64::from(image.height()))),
        ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
        ("Filter", Object::Name(b"DCTDecode".to_vec())),
    ]);

    // Already DCT-encoded; keep lopdf from flate-compressing it again
    Ok(output.add_object(Stream::new(dict, jpeg).with_compression(false)))
}

/// Create a page that shows `image` stretched over the full `width` x `height` page
pub fn add_image_page(
    output: &mut Document,
    image: &RgbImage,
    quality: u8,
    width_pt: f32,
    height_pt: f32,
    parent_pages_id: ObjectId,
) -> Result<ObjectId> {
    let image_id = add_image_xobject(output, image, quality)?;

    let content = format!("q {width_pt} 0 0 {height_pt} 0 0 cm /{PAGE_IMAGE_NAME} Do Q");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut xobjects = Dictionary::new();
    xobjects.set(PAGE_IMAGE_NAME, Object::Reference(image_id));
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width_pt),
            Object::Real(height_pt),
        ]),
    );
    page_dict.set("Resources", Object::Dictionary(resources));
    page_dict.set("Contents", Object::Reference(content_id));

    Ok(output.add_object(page_dict))
}
