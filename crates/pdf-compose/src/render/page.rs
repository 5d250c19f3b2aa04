//! Page attribute access and in-place page edits
//!
//! Pages can inherit MediaBox, CropBox, Resources and Rotate from their
//! ancestors in the page tree. Everything here resolves those through the
//! `Parent` chain, and writes always go onto the page dictionary itself.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Rectangle as `[llx, lly, urx, ury]` in points
pub type PageBox = [f32; 4];

const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Boxes that are only meaningful relative to the old MediaBox
const DERIVED_BOXES: [&[u8]; 4] = [b"CropBox", b"BleedBox", b"TrimBox", b"ArtBox"];

// =============================================================================
// Reading
// =============================================================================

/// Look up `key` on the page or the nearest ancestor that defines it
pub fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut current = Some(page_id);
    // Bounded walk in case of a cyclic Parent chain
    for _ in 0..64 {
        let dict = doc.get_dictionary(current?).ok()?;
        if let Ok(value) = dict.get(key) {
            return resolve(doc, value);
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }
    None
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// Read a box attribute (`MediaBox`, `CropBox`, ...) including inherited values
pub fn page_box(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<PageBox> {
    let arr = inherited_attribute(doc, page_id, key)?.as_array().ok()?;
    if arr.len() != 4 {
        return None;
    }
    let mut rect = [0.0; 4];
    for (slot, obj) in rect.iter_mut().zip(arr) {
        *slot = extract_number(resolve(doc, obj)?)?;
    }
    Some(rect)
}

/// Effective MediaBox, falling back to US Letter when the page has none
pub fn media_box(doc: &Document, page_id: ObjectId) -> PageBox {
    page_box(doc, page_id, b"MediaBox").unwrap_or([
        0.0,
        0.0,
        DEFAULT_PAGE_DIMENSIONS.0,
        DEFAULT_PAGE_DIMENSIONS.1,
    ])
}

/// Get source page dimensions (width, height) in points
pub fn page_dimensions(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let [llx, lly, urx, ury] = media_box(doc, page_id);
    ((urx - llx).abs(), (ury - lly).abs())
}

/// Effective rotation normalized to 0, 90, 180 or 270
pub fn rotation(doc: &Document, page_id: ObjectId) -> i64 {
    inherited_attribute(doc, page_id, b"Rotate")
        .and_then(|obj| match obj {
            Object::Integer(i) => Some(*i),
            Object::Real(r) => Some(*r as i64),
            _ => None,
        })
        .unwrap_or(0)
        .rem_euclid(360)
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

// =============================================================================
// Writing
// =============================================================================

pub fn box_object(rect: PageBox) -> Object {
    Object::Array(rect.iter().map(|&v| number_object(v)).collect())
}

fn number_object(value: f32) -> Object {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f32 {
        Object::Integer(value as i64)
    } else {
        Object::Real(value)
    }
}

fn page_dict_mut(doc: &mut Document, page_id: ObjectId) -> Result<&mut Dictionary> {
    Ok(doc.get_dictionary_mut(page_id)?)
}

/// Copy inherited attributes onto the page so it stands on its own
pub fn materialize_inherited(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let mut inherited = Vec::new();
    {
        let dict = doc.get_dictionary(page_id)?;
        for key in INHERITABLE_KEYS {
            if dict.has(key) {
                continue;
            }
            if let Some(value) = inherited_attribute(doc, page_id, key) {
                inherited.push((key, value.clone()));
            }
        }
    }

    let dict = page_dict_mut(doc, page_id)?;
    for (key, value) in inherited {
        dict.set(key.to_vec(), value);
    }
    Ok(())
}

pub fn set_page_box(doc: &mut Document, page_id: ObjectId, key: &str, rect: PageBox) -> Result<()> {
    page_dict_mut(doc, page_id)?.set(key, box_object(rect));
    Ok(())
}

/// Replace the MediaBox and drop boxes that were relative to the old one
pub fn redefine_boundary(doc: &mut Document, page_id: ObjectId, rect: PageBox) -> Result<()> {
    let dict = page_dict_mut(doc, page_id)?;
    dict.set("MediaBox", box_object(rect));
    for key in DERIVED_BOXES {
        dict.remove(key);
    }
    Ok(())
}

pub fn set_rotation(doc: &mut Document, page_id: ObjectId, degrees: i64) -> Result<()> {
    page_dict_mut(doc, page_id)?.set("Rotate", Object::Integer(degrees.rem_euclid(360)));
    Ok(())
}

/// Surround the page's content streams with `prefix` and `suffix` operators
pub fn wrap_contents(
    doc: &mut Document,
    page_id: ObjectId,
    prefix: Vec<u8>,
    suffix: Vec<u8>,
) -> Result<()> {
    let contents = doc.get_dictionary(page_id)?.get(b"Contents").ok().cloned();
    let mut streams = match contents {
        Some(Object::Reference(id)) => match doc.get_object(id) {
            Ok(Object::Array(arr)) => arr.clone(),
            _ => vec![Object::Reference(id)],
        },
        Some(Object::Array(arr)) => arr,
        _ => Vec::new(),
    };

    let prefix_id = doc.add_object(Stream::new(Dictionary::new(), prefix));
    let suffix_id = doc.add_object(Stream::new(Dictionary::new(), suffix));
    streams.insert(0, Object::Reference(prefix_id));
    streams.push(Object::Reference(suffix_id));

    page_dict_mut(doc, page_id)?.set("Contents", Object::Array(streams));
    Ok(())
}

// =============================================================================
// Fitting
// =============================================================================

/// Uniform scale-and-center matrix mapping `from` into a `width` x `height` box at the origin
pub fn fit_matrix(from: PageBox, width: f32, height: f32) -> [f32; 6] {
    let [llx, lly, urx, ury] = from;
    let src_width = (urx - llx).abs().max(f32::EPSILON);
    let src_height = (ury - lly).abs().max(f32::EPSILON);

    let scale = (width / src_width).min(height / src_height);
    let tx = (width - src_width * scale) / 2.0 - llx.min(urx) * scale;
    let ty = (height - src_height * scale) / 2.0 - lly.min(ury) * scale;

    [scale, 0.0, 0.0, scale, tx, ty]
}

/// Matrix turning a `width` x `height` box at the origin upright for a page
/// displayed with `rotate` degrees clockwise; the result spans the rotated box
pub fn upright_matrix(rotate: i64, width: f32, height: f32) -> [f32; 6] {
    match rotate.rem_euclid(360) {
        90 => [0.0, -1.0, 1.0, 0.0, 0.0, width],
        180 => [-1.0, 0.0, 0.0, -1.0, width, height],
        270 => [0.0, 1.0, -1.0, 0.0, height, 0.0],
        _ => [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    }
}

fn cm_operator([a, b, c, d, e, f]: [f32; 6]) -> String {
    format!("{a} {b} {c} {d} {e} {f} cm\n")
}

/// Give the page a `width` x `height` boundary according to `fit`
///
/// With `ScaleContent` the visible area is drawn upright, scaled, centered and
/// clipped, and the page ends up unrotated.
pub fn fit_page(
    doc: &mut Document,
    page_id: ObjectId,
    width: f32,
    height: f32,
    fit: PageFit,
) -> Result<()> {
    match fit {
        PageFit::Keep => return Ok(()),
        PageFit::Boundary => {}
        PageFit::ScaleContent => {
            let [x0, y0, x1, y1] = page_box(doc, page_id, b"CropBox").unwrap_or_else(|| media_box(doc, page_id));
            let (llx, lly) = (x0.min(x1), y0.min(y1));
            let (src_width, src_height) = ((x1 - x0).abs(), (y1 - y0).abs());

            let rotate = rotation(doc, page_id);
            let (shown_width, shown_height) = match rotate {
                90 | 270 => (src_height, src_width),
                _ => (src_width, src_height),
            };

            // Operators apply last-first: move the visible box to the origin,
            // turn it upright, then scale it into the target
            let mut prefix = String::from("q ");
            prefix += &cm_operator(fit_matrix([0.0, 0.0, shown_width, shown_height], width, height));
            prefix += &cm_operator(upright_matrix(rotate, src_width, src_height));
            prefix += &cm_operator([1.0, 0.0, 0.0, 1.0, -llx, -lly]);
            prefix += &format!("{llx} {lly} {src_width} {src_height} re W n\n");

            wrap_contents(doc, page_id, prefix.into_bytes(), b"\nQ".to_vec())?;
            set_rotation(doc, page_id, 0)?;
        }
    }
    redefine_boundary(doc, page_id, [0.0, 0.0, width, height])
}
