//! Document-level types.

use super::{Element, PageRecord};
use serde::{Deserialize, Serialize};

/// A materialized document model: the ordered element stream plus the
/// side-channel data the export pipeline needs.
///
/// The generated image list is handed over explicitly, in order, by the
/// adapter; consumers never re-derive it by scanning the filesystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentModel {
    /// Sanitized stem of the input file name; keys the working directory
    pub stem: String,

    /// Ordered element stream
    pub elements: Vec<Element>,

    /// Generated image files, in the same relative order the `Picture`
    /// elements appear in the stream
    pub images: Vec<GeneratedImage>,

    /// Per-page side data for the flattened dataset
    pub pages: Vec<PageRecord>,

    /// Non-fatal notes surfaced by the adapter (e.g. truncation)
    pub notes: Vec<String>,
}

impl DocumentModel {
    /// Create an empty model for the given stem.
    pub fn new(stem: impl Into<String>) -> Self {
        Self {
            stem: stem.into(),
            elements: Vec::new(),
            images: Vec::new(),
            pages: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Append an element to the stream.
    pub fn push_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Register a generated image, in stream order.
    pub fn push_image(&mut self, image: GeneratedImage) {
        self.images.push(image);
    }

    /// Record a non-fatal note.
    pub fn push_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Number of `Table` elements in the stream.
    pub fn table_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_table()).count()
    }

    /// Number of `Picture` elements in the stream.
    pub fn picture_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_picture()).count()
    }

    /// Check if the model has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// A generated image file written to the job's working directory by the
/// adapter before the model is handed over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// File name within the working directory (sortable scheme)
    pub file_name: String,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

impl GeneratedImage {
    /// Create a generated image record.
    pub fn new(file_name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            file_name: file_name.into(),
            width,
            height,
        }
    }

    /// The stable file name for the nth generated image (1-based) of a
    /// document. Also used by the reconciler as the fallback placeholder
    /// name when the image list is shorter than the picture count.
    pub fn numbered_name(stem: &str, n: usize) -> String {
        format!("{stem}_img_{n}.png")
    }
}

/// Reduce a file name to a directory-safe stem.
///
/// Keeps ASCII alphanumerics, `-`, `_`, and `.`; everything else becomes
/// `_`. An empty result falls back to `"document"`.
pub fn sanitize_stem(name: &str) -> String {
    let stem = name.rsplit_once('.').map(|(s, _)| s).unwrap_or(name);
    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('.').to_string();
    if trimmed.is_empty() {
        "document".to_string()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_counts() {
        let mut model = DocumentModel::new("doc");
        model.push_element(Element::heading(1, "Intro"));
        model.push_element(Element::Picture);
        model.push_element(Element::Picture);
        assert_eq!(model.picture_count(), 2);
        assert_eq!(model.table_count(), 0);
        assert!(!model.is_empty());
    }

    #[test]
    fn test_numbered_name() {
        assert_eq!(GeneratedImage::numbered_name("doc", 1), "doc_img_1.png");
    }

    #[test]
    fn test_sanitize_stem() {
        assert_eq!(sanitize_stem("Quarterly Report.pdf"), "Quarterly_Report");
        assert_eq!(sanitize_stem("a/b\\c.docx"), "a_b_c");
        assert_eq!(sanitize_stem("..."), "document");
        assert_eq!(sanitize_stem("noext"), "noext");
    }
}
