use crate::constants::DEFAULT_JPEG_QUALITY;
use crate::convert::DocumentConverter;
use crate::types::*;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for merging inputs into one normalized document
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComposeOptions {
    /// Page size every output page is normalized to
    pub canvas: CanvasSpec,

    /// How PDF pages are fitted onto the canvas
    pub page_fit: PageFit,

    /// JPEG quality (1-100) for image pages
    pub jpeg_quality: u8,

    /// Converter for office documents; without one they are rejected
    #[cfg_attr(feature = "serde", serde(skip))]
    pub converter: Option<Arc<dyn DocumentConverter>>,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            canvas: CanvasSpec::default(),
            page_fit: PageFit::Boundary,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            converter: None,
        }
    }
}

impl fmt::Debug for ComposeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposeOptions")
            .field("canvas", &self.canvas)
            .field("page_fit", &self.page_fit)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("converter", &self.converter.as_ref().map(|c| c.name()))
            .finish()
    }
}

impl ComposeOptions {
    pub fn with_canvas(mut self, canvas: CanvasSpec) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn with_page_fit(mut self, page_fit: PageFit) -> Self {
        self.page_fit = page_fit;
        self
    }

    pub fn with_converter(mut self, converter: impl DocumentConverter + 'static) -> Self {
        self.converter = Some(Arc::new(converter));
        self
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| ComposeError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ComposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        self.canvas.validate()?;

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ComposeError::Config(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }

        Ok(())
    }
}
