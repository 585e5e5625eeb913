//! Document model adapter: the seam between the external parsing engine
//! and the export pipeline.
//!
//! The heavy lifting (layout analysis, OCR, table structure recognition)
//! lives outside this crate. Implement [`ParsingEngine`] to plug a real
//! engine in; the pipeline only consumes the [`DocumentModel`] the engine
//! materializes, including the generated image files the engine writes to
//! the job's working directory before returning.

pub mod sheet;
mod text;

pub use text::TextEngine;

use crate::error::{Error, Result};
use crate::model::{sanitize_stem, DocumentModel};
use crate::settings::Settings;
use std::path::Path;

/// Declared format of one batch input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFormat {
    /// PDF document
    Pdf,
    /// Word document
    Docx,
    /// Excel workbook
    Xlsx,
    /// OpenDocument spreadsheet
    Ods,
    /// PowerPoint presentation
    Pptx,
    /// HTML document
    Html,
    /// Markdown text
    Markdown,
    /// AsciiDoc text
    AsciiDoc,
    /// Comma-separated values
    Csv,
    /// Raster image (png/jpg)
    Image,
    /// Plain text
    Text,
}

impl InputFormat {
    /// Resolve a format from a file extension (lowercase, no dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(InputFormat::Pdf),
            "docx" => Some(InputFormat::Docx),
            "xlsx" | "xls" | "xlsb" => Some(InputFormat::Xlsx),
            "ods" => Some(InputFormat::Ods),
            "pptx" => Some(InputFormat::Pptx),
            "html" | "htm" => Some(InputFormat::Html),
            "md" | "markdown" => Some(InputFormat::Markdown),
            "asciidoc" | "adoc" => Some(InputFormat::AsciiDoc),
            "csv" => Some(InputFormat::Csv),
            "png" | "jpg" | "jpeg" => Some(InputFormat::Image),
            "txt" => Some(InputFormat::Text),
            _ => None,
        }
    }

    /// Resolve a format from a file name.
    pub fn from_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Spreadsheet inputs bypass the document model entirely and go
    /// straight to sheet-derived table extraction.
    pub fn is_spreadsheet(&self) -> bool {
        matches!(self, InputFormat::Xlsx | InputFormat::Ods)
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InputFormat::Pdf => "pdf",
            InputFormat::Docx => "docx",
            InputFormat::Xlsx => "xlsx",
            InputFormat::Ods => "ods",
            InputFormat::Pptx => "pptx",
            InputFormat::Html => "html",
            InputFormat::Markdown => "md",
            InputFormat::AsciiDoc => "asciidoc",
            InputFormat::Csv => "csv",
            InputFormat::Image => "image",
            InputFormat::Text => "txt",
        };
        write!(f, "{name}")
    }
}

/// One input document handed to the orchestrator.
#[derive(Debug, Clone)]
pub struct DocumentInput {
    /// Original file name
    pub name: String,

    /// Raw file bytes
    pub bytes: Vec<u8>,

    /// Declared format
    pub format: InputFormat,
}

impl DocumentInput {
    /// Create an input with an explicit format.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, format: InputFormat) -> Self {
        Self {
            name: name.into(),
            bytes,
            format,
        }
    }

    /// Create an input, deriving the format from the file name.
    pub fn from_name(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let format = InputFormat::from_name(&name)
            .ok_or_else(|| Error::UnsupportedFormat(name.clone()))?;
        Ok(Self {
            name,
            bytes,
            format,
        })
    }

    /// Sanitized stem of the input name.
    pub fn stem(&self) -> String {
        sanitize_stem(&self.name)
    }
}

/// Trait for parsing engines that materialize a [`DocumentModel`].
///
/// Contract: the engine writes zero or more image files into `job_dir`
/// (named with the sortable `<stem>_img_<n>.png` scheme or equivalent)
/// before returning, and lists them in the model's `images` field in
/// stream order. Hard limits from [`Settings`] are enforced here;
/// truncation that the engine tolerates is surfaced as a model note,
/// not a failure.
pub trait ParsingEngine: Send + Sync {
    /// Name of this engine.
    fn name(&self) -> &str;

    /// Formats this engine can materialize.
    fn supported_formats(&self) -> &[InputFormat];

    /// Parse raw bytes into a document model, writing generated images
    /// into `job_dir`.
    fn parse(
        &self,
        input: &DocumentInput,
        job_dir: &Path,
        settings: &Settings,
    ) -> Result<DocumentModel>;

    /// Check if this engine supports the given format.
    fn supports(&self, format: InputFormat) -> bool {
        self.supported_formats().contains(&format)
    }
}

/// Enforce the batch-wide input size cap. Engines call this before doing
/// any work; a violation is fatal for the job.
pub fn check_byte_limit(input: &DocumentInput, settings: &Settings) -> Result<()> {
    let size = input.bytes.len() as u64;
    if size > settings.max_document_bytes {
        return Err(Error::LimitExceeded {
            name: input.name.clone(),
            detail: format!(
                "{size} bytes exceeds the {} byte cap",
                settings.max_document_bytes
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_extension("PDF"), Some(InputFormat::Pdf));
        assert_eq!(InputFormat::from_extension("htm"), Some(InputFormat::Html));
        assert_eq!(InputFormat::from_extension("exe"), None);
    }

    #[test]
    fn test_format_from_name() {
        assert_eq!(
            InputFormat::from_name("report.final.XLSX"),
            Some(InputFormat::Xlsx)
        );
        assert_eq!(InputFormat::from_name("noext"), None);
    }

    #[test]
    fn test_spreadsheet_bypass() {
        assert!(InputFormat::Xlsx.is_spreadsheet());
        assert!(InputFormat::Ods.is_spreadsheet());
        assert!(!InputFormat::Csv.is_spreadsheet());
    }

    #[test]
    fn test_input_from_name_unsupported() {
        let result = DocumentInput::from_name("virus.exe", vec![]);
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_byte_limit() {
        let settings = Settings::new().with_max_bytes(4);
        let input = DocumentInput::new("big.txt", vec![0; 5], InputFormat::Text);
        assert!(matches!(
            check_byte_limit(&input, &settings),
            Err(Error::LimitExceeded { .. })
        ));

        let small = DocumentInput::new("ok.txt", vec![0; 4], InputFormat::Text);
        assert!(check_byte_limit(&small, &settings).is_ok());
    }
}
