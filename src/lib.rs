//! # docbundle
//!
//! Batch document export and packaging library for Rust.
//!
//! This library takes parsed documents and renders each one into a set
//! of synchronized outputs (Markdown, HTML, JSON, annotated flat text,
//! CSV tables, raster images), then packages the whole batch into one
//! hierarchical ZIP archive.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docbundle::{Docbundle, load_inputs};
//! use std::fs::File;
//!
//! fn main() -> docbundle::Result<()> {
//!     let inputs = load_inputs(&["notes.md".into(), "report.txt".into()])?;
//!
//!     let archive = File::create("bundle.zip")?;
//!     let (report, _) = Docbundle::new()
//!         .out_root("./work")
//!         .run_to_archive(&inputs, archive)?;
//!
//!     println!("{} completed, {} failed",
//!         report.completed_count(), report.failed_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Synchronized outputs**: every rendering walks the same element
//!   stream, so table numbering and image references agree across formats
//! - **Failure isolation**: one unreadable document fails its own job
//!   and nothing else
//! - **Spreadsheet bypass**: workbooks go straight to per-sheet exports
//! - **Parallel processing**: jobs run concurrently via Rayon
//! - **Flattened dataset**: optional cross-document page rows as JSONL

pub mod archive;
pub mod batch;
pub mod engine;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;
pub mod settings;

// Re-export commonly used types
pub use archive::{archive_path, Artifact, ArtifactKind};
pub use batch::{
    BatchOrchestrator, BatchReport, DocumentJob, FlattenedDataset, JobState, PageRow,
};
pub use engine::{DocumentInput, InputFormat, ParsingEngine, TextEngine};
pub use error::{Error, Result};
pub use model::{
    DocumentModel, Element, GeneratedImage, PageImage, PageRecord, Table, TableRow,
};
pub use render::{ImageRefMode, RecordFormat, RenderOptions};
pub use settings::Settings;

use std::fs;
use std::io::{Seek, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Read a list of files into batch inputs, deriving formats from the
/// file names.
///
/// # Example
///
/// ```no_run
/// use docbundle::load_inputs;
///
/// let inputs = load_inputs(&["a.md".into(), "b.xlsx".into()]).unwrap();
/// assert_eq!(inputs.len(), 2);
/// ```
pub fn load_inputs(paths: &[PathBuf]) -> Result<Vec<DocumentInput>> {
    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;
        let bytes = fs::read(path)?;
        inputs.push(DocumentInput::from_name(name, bytes)?);
    }
    Ok(inputs)
}

/// Builder for batch export runs.
///
/// # Example
///
/// ```no_run
/// use docbundle::{Docbundle, load_inputs};
///
/// let inputs = load_inputs(&["notes.md".into()])?;
/// let report = Docbundle::new()
///     .out_root("./work")
///     .with_flattened_dataset(true)
///     .run(&inputs)?;
/// # Ok::<(), docbundle::Error>(())
/// ```
pub struct Docbundle {
    engine: Arc<dyn ParsingEngine>,
    settings: Settings,
    out_root: PathBuf,
}

impl Docbundle {
    /// Create a builder with the built-in text engine and defaults.
    pub fn new() -> Self {
        Self {
            engine: Arc::new(TextEngine::new()),
            settings: Settings::default(),
            out_root: PathBuf::from("docbundle_output"),
        }
    }

    /// Use a custom parsing engine.
    pub fn with_engine(mut self, engine: Arc<dyn ParsingEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Set the root directory for job working directories.
    pub fn out_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.out_root = root.into();
        self
    }

    /// Replace the settings wholesale.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Enable or disable table extraction.
    pub fn with_tables(mut self, extract: bool) -> Self {
        self.settings = self.settings.with_tables(extract);
        self
    }

    /// Enable or disable image extraction.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.settings = self.settings.with_images(extract);
        self
    }

    /// Enable or disable the flattened dataset.
    pub fn with_flattened_dataset(mut self, emit: bool) -> Self {
        self.settings = self.settings.with_flattened_dataset(emit);
        self
    }

    /// Set how renderings reference generated images.
    pub fn with_image_ref_mode(mut self, mode: ImageRefMode) -> Self {
        self.settings = self.settings.with_image_ref_mode(mode);
        self
    }

    /// Run the batch and return the report.
    pub fn run(self, inputs: &[DocumentInput]) -> Result<BatchReport> {
        BatchOrchestrator::new(self.engine, self.settings, self.out_root).run(inputs)
    }

    /// Run the batch and write the archive in one call.
    pub fn run_to_archive<W: Write + Seek>(
        self,
        inputs: &[DocumentInput],
        writer: W,
    ) -> Result<(BatchReport, W)> {
        BatchOrchestrator::new(self.engine, self.settings, self.out_root)
            .run_to_archive(inputs, writer)
    }
}

impl Default for Docbundle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let bundle = Docbundle::new();
        assert!(bundle.settings.extract_tables);
        assert!(!bundle.settings.emit_flattened_dataset);
        assert_eq!(bundle.out_root, PathBuf::from("docbundle_output"));
    }

    #[test]
    fn test_builder_chained() {
        let bundle = Docbundle::new()
            .out_root("/tmp/w")
            .with_tables(false)
            .with_flattened_dataset(true)
            .with_image_ref_mode(ImageRefMode::Embedded);

        assert!(!bundle.settings.extract_tables);
        assert!(bundle.settings.emit_flattened_dataset);
        assert_eq!(bundle.settings.image_ref_mode, ImageRefMode::Embedded);
    }

    #[test]
    fn test_load_inputs_unknown_extension() {
        let result = load_inputs(&[PathBuf::from("archive.rar")]);
        assert!(result.is_err());
    }
}
