use crate::constants::{A4_HEIGHT_PT, A4_WIDTH_PT, IMAGE_EXTENSIONS, OFFICE_EXTENSIONS};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("Cannot read {}: {reason}", .path.display())]
    UnreadableSource { path: PathBuf, reason: String },
    #[error("Unsupported file type: {}", .0.display())]
    UnsupportedKind(PathBuf),
    #[error("Invalid page range '{0}' (expected <start>-<end>, e.g. 9-25)")]
    InvalidRange(String),
    /// Nothing to write; carries the failures of the inputs that were tried
    #[error("No pages were produced")]
    EmptyResult(Vec<ItemFailure>),
    #[error("External converter failed: {0}")]
    ExternalToolFailure(String),
    #[error("Cannot write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ComposeError>;

/// Target page size for a merge or resize, in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanvasSpec {
    pub width_pt: f32,
    pub height_pt: f32,
    /// Resolution used when rasterizing images. `None` means one pixel per point.
    pub dpi: Option<u32>,
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self::a4()
    }
}

impl CanvasSpec {
    pub fn new(width_pt: f32, height_pt: f32) -> Result<Self> {
        let canvas = Self {
            width_pt,
            height_pt,
            dpi: None,
        };
        canvas.validate()?;
        Ok(canvas)
    }

    /// A4 portrait (595 x 842 pt)
    pub fn a4() -> Self {
        Self {
            width_pt: A4_WIDTH_PT,
            height_pt: A4_HEIGHT_PT,
            dpi: None,
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = Some(dpi);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width_pt > 0.0 && self.height_pt > 0.0) {
            return Err(ComposeError::Config(format!(
                "Canvas must have a positive size, got {} x {}",
                self.width_pt, self.height_pt
            )));
        }
        if self.dpi == Some(0) {
            return Err(ComposeError::Config("DPI must be positive".to_string()));
        }
        Ok(())
    }
}

/// How a PDF page is fitted onto a new page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageFit {
    /// Only redefine the page boundary; content keeps its original coordinates
    #[default]
    Boundary,
    /// Redefine the boundary and scale the content to fit it, centered
    ScaleContent,
    /// Leave the page as it is
    Keep,
}

/// Page rotation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise90,
    CounterClockwise90,
}

impl Rotation {
    pub fn degrees(self) -> i64 {
        match self {
            Rotation::Clockwise90 => 90,
            Rotation::CounterClockwise90 => -90,
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Rotation::Clockwise90 => Rotation::CounterClockwise90,
            Rotation::CounterClockwise90 => Rotation::Clockwise90,
        }
    }
}

/// Kind of input file, inferred from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    Image,
    /// Office document that needs an external converter first
    Office,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if ext == "pdf" {
            Some(SourceKind::Pdf)
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(SourceKind::Image)
        } else if OFFICE_EXTENSIONS.contains(&ext.as_str()) {
            Some(SourceKind::Office)
        } else {
            None
        }
    }
}

/// One user-selected input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceItem {
    pub path: PathBuf,
    pub kind: Option<SourceKind>,
}

impl SourceItem {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = SourceKind::from_path(&path);
        Self { path, kind }
    }
}

impl From<PathBuf> for SourceItem {
    fn from(path: PathBuf) -> Self {
        SourceItem::new(path)
    }
}

impl From<&Path> for SourceItem {
    fn from(path: &Path) -> Self {
        SourceItem::new(path)
    }
}

/// A failed input and the reason it failed
#[derive(Debug)]
pub struct ItemFailure {
    pub path: PathBuf,
    pub error: ComposeError,
}

/// Outcome of a merge or batch run
#[derive(Debug, Default)]
pub struct BatchResult {
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<ItemFailure>,
    /// Files written by the run
    pub outputs: Vec<PathBuf>,
}

impl BatchResult {
    pub(crate) fn record<T>(&mut self, path: &Path, outcome: Result<T>) -> Option<T> {
        self.attempted += 1;
        match outcome {
            Ok(value) => {
                self.succeeded += 1;
                Some(value)
            }
            Err(error) => {
                log::warn!("{}: {}", path.display(), error);
                self.failures.push(ItemFailure {
                    path: path.to_path_buf(),
                    error,
                });
                None
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
