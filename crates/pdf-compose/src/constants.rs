//! Shared constants for page composition and batch transforms

// =============================================================================
// Page Dimensions
// =============================================================================

/// A4 portrait width in points
pub const A4_WIDTH_PT: f32 = 595.0;

/// A4 portrait height in points
pub const A4_HEIGHT_PT: f32 = 842.0;

/// Points per inch; also the raster resolution when no DPI is given
pub const POINTS_PER_INCH: f32 = 72.0;

/// Fallback page size when a page has no usable MediaBox (US Letter)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (612.0, 792.0);

// =============================================================================
// Raster Pages
// =============================================================================

/// JPEG quality for embedded image pages
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Letterbox fill color
pub const BACKGROUND_RGB: [u8; 3] = [255, 255, 255];

/// XObject name used for the full-page image
pub const PAGE_IMAGE_NAME: &str = "Im0";

// =============================================================================
// Batch Transforms
// =============================================================================

/// Default points trimmed from the top and bottom of each page
pub const DEFAULT_TRIM_PT: f32 = 190.0;

pub const RESIZE_SUFFIX: &str = "_resized";
pub const TRIM_SUFFIX: &str = "_trimmed";
pub const REMOVE_SUFFIX: &str = "_pages_removed";
pub const ROTATE_SUFFIX: &str = "_rotated";

// =============================================================================
// Input Kinds
// =============================================================================

pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "tif", "tiff", "bmp", "gif", "webp",
];

pub const OFFICE_EXTENSIONS: &[&str] = &[
    "odt", "ods", "odp", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "rtf",
];

/// Converter binary invoked for office documents
pub const DEFAULT_CONVERTER_PROGRAM: &str = "libreoffice";
