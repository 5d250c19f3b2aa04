//! Office document to PDF conversion through an external program

use crate::constants::DEFAULT_CONVERTER_PROGRAM;
use crate::types::*;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Anything that can turn a document into a PDF file
pub trait DocumentConverter: Send + Sync {
    /// Short name for logs and messages
    fn name(&self) -> &str;

    /// Convert `input` and write the PDF into `out_dir`, returning its path
    fn convert(&self, input: &Path, out_dir: &Path) -> Result<PathBuf>;
}

/// Convert `input` next to itself: `report.odt` becomes `report.pdf`
pub fn convert_in_place(converter: &dyn DocumentConverter, input: &Path) -> Result<PathBuf> {
    let out_dir = match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    converter.convert(input, &out_dir)
}

/// Path of the PDF a converter produces for `input` in `out_dir`
pub fn converted_path(input: &Path, out_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".pdf");
    out_dir.join(name)
}

/// Headless LibreOffice (`--convert-to pdf`)
#[derive(Debug, Clone)]
pub struct LibreOfficeConverter {
    program: PathBuf,
}

impl Default for LibreOfficeConverter {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERTER_PROGRAM)
    }
}

impl LibreOfficeConverter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl DocumentConverter for LibreOfficeConverter {
    fn name(&self) -> &str {
        "libreoffice"
    }

    fn convert(&self, input: &Path, out_dir: &Path) -> Result<PathBuf> {
        if !input.exists() {
            return Err(ComposeError::MissingFile(input.to_path_buf()));
        }

        log::info!(
            "Converting {} with {}",
            input.display(),
            self.program.display()
        );

        let output = Command::new(&self.program)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(out_dir)
            .arg(input)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                ComposeError::ExternalToolFailure(format!(
                    "failed to run {}: {e}",
                    self.program.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ComposeError::ExternalToolFailure(format!(
                "{} exited with {} while converting {}: {}",
                self.program.display(),
                output.status,
                input.display(),
                stderr.trim()
            )));
        }

        let pdf_path = converted_path(input, out_dir);
        if !pdf_path.exists() {
            return Err(ComposeError::ExternalToolFailure(format!(
                "{} reported success but {} was not created",
                self.program.display(),
                pdf_path.display()
            )));
        }

        log::debug!("Converted {} -> {}", input.display(), pdf_path.display());
        Ok(pdf_path)
    }
}
