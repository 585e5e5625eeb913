//! Batch export settings.

use crate::render::ImageRefMode;

/// Settings for a batch export run.
///
/// Constructed once before the batch starts and shared read-only by every
/// job; there is no process-wide mutable configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Extract tables to CSV artifacts
    pub extract_tables: bool,

    /// Extract generated images as raster artifacts
    pub extract_images: bool,

    /// Emit the annotated flat-text narrative
    pub emit_annotated_text: bool,

    /// Emit the structured markup renderings (Markdown and HTML)
    pub emit_structured_markup: bool,

    /// Emit the machine-readable record (JSON)
    pub emit_machine_record: bool,

    /// Build the cross-document flattened dataset after all jobs resolve
    pub emit_flattened_dataset: bool,

    /// Ask the engine to run OCR on image-based inputs
    pub use_ocr: bool,

    /// Scale factor for generated page/picture images
    pub image_scale: f32,

    /// Hard cap on pages per document, enforced by the engine
    pub max_pages_per_document: u32,

    /// Hard cap on input size in bytes
    pub max_document_bytes: u64,

    /// How renderings reference generated images
    pub image_ref_mode: ImageRefMode,
}

impl Settings {
    /// Create settings with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable table extraction.
    pub fn with_tables(mut self, extract: bool) -> Self {
        self.extract_tables = extract;
        self
    }

    /// Enable or disable image extraction.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.extract_images = extract;
        self
    }

    /// Enable or disable the annotated-text output.
    pub fn with_annotated_text(mut self, emit: bool) -> Self {
        self.emit_annotated_text = emit;
        self
    }

    /// Enable or disable the structured markup outputs.
    pub fn with_structured_markup(mut self, emit: bool) -> Self {
        self.emit_structured_markup = emit;
        self
    }

    /// Enable or disable the machine-record output.
    pub fn with_machine_record(mut self, emit: bool) -> Self {
        self.emit_machine_record = emit;
        self
    }

    /// Enable or disable the flattened dataset.
    pub fn with_flattened_dataset(mut self, emit: bool) -> Self {
        self.emit_flattened_dataset = emit;
        self
    }

    /// Enable or disable OCR.
    pub fn with_ocr(mut self, ocr: bool) -> Self {
        self.use_ocr = ocr;
        self
    }

    /// Set the image scale factor (clamped to 1.0..=4.0).
    pub fn with_image_scale(mut self, scale: f32) -> Self {
        self.image_scale = scale.clamp(1.0, 4.0);
        self
    }

    /// Set the page cap per document.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.max_pages_per_document = pages;
        self
    }

    /// Set the input size cap in bytes.
    pub fn with_max_bytes(mut self, bytes: u64) -> Self {
        self.max_document_bytes = bytes;
        self
    }

    /// Set the image reference mode used by all renderings.
    pub fn with_image_ref_mode(mut self, mode: ImageRefMode) -> Self {
        self.image_ref_mode = mode;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extract_tables: true,
            extract_images: true,
            emit_annotated_text: true,
            emit_structured_markup: true,
            emit_machine_record: true,
            emit_flattened_dataset: false,
            use_ocr: true,
            image_scale: 2.0,
            max_pages_per_document: 100,
            max_document_bytes: 20 * 1024 * 1024,
            image_ref_mode: ImageRefMode::Referenced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert!(settings.extract_tables);
        assert!(!settings.emit_flattened_dataset);
        assert_eq!(settings.max_pages_per_document, 100);
        assert_eq!(settings.max_document_bytes, 20 * 1024 * 1024);
    }

    #[test]
    fn test_settings_builder() {
        let settings = Settings::new()
            .with_tables(false)
            .with_flattened_dataset(true)
            .with_image_scale(10.0)
            .with_max_pages(5);

        assert!(!settings.extract_tables);
        assert!(settings.emit_flattened_dataset);
        assert_eq!(settings.image_scale, 4.0); // clamped
        assert_eq!(settings.max_pages_per_document, 5);
    }
}
