//! Low-level PDF object work shared by composition and batch transforms
//!
//! - Deep copying pages and their resources between documents
//! - Reading and rewriting page boxes, rotation and content streams
//! - Embedding raster pages as image XObjects

mod copy;
mod raster;
mod page;

pub use copy::{copy_dictionary, copy_object_deep};
pub use raster::{add_image_page, add_image_xobject};
pub use page::*;
