//! Flattened cross-document dataset.
//!
//! One row per page of every completed job, drawn directly from the
//! adapter's per-page side data; independent of the reconciler's output.
//! Rows carry their own document/page identity, so append order across
//! jobs is not significant.

use crate::error::Result;
use crate::model::PageRecord;
use base64::Engine as _;
use serde::Serialize;

/// One row of the flattened dataset.
#[derive(Debug, Clone, Serialize)]
pub struct PageRow {
    /// Document name
    pub document: String,

    /// Page number (1-indexed)
    pub page: u32,

    /// Page text
    pub text: String,

    /// Page markup fragment
    pub markup: String,

    /// Width of the page's generated image, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_width: Option<u32>,

    /// Height of the page's generated image, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_height: Option<u32>,

    /// Base64-encoded image bytes, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_bytes: Option<String>,
}

impl PageRow {
    fn from_page(document: &str, page: &PageRecord) -> Self {
        let image = page.image.as_ref();
        Self {
            document: document.to_string(),
            page: page.number,
            text: page.text.clone(),
            markup: page.markup.clone(),
            image_width: image.map(|i| i.width),
            image_height: image.map(|i| i.height),
            image_bytes: image.map(|i| {
                base64::engine::general_purpose::STANDARD.encode(&i.bytes)
            }),
        }
    }
}

/// Accumulator for the flattened dataset. Append-only; each job
/// contributes its rows exactly once.
#[derive(Debug, Default)]
pub struct FlattenedDataset {
    rows: Vec<PageRow>,
}

impl FlattenedDataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one completed job's pages.
    pub fn append_job(&mut self, document: &str, pages: &[PageRecord]) {
        self.rows
            .extend(pages.iter().map(|p| PageRow::from_page(document, p)));
    }

    /// All rows accumulated so far.
    pub fn rows(&self) -> &[PageRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize as JSON Lines, one row per line.
    pub fn to_jsonl(&self) -> Result<String> {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&serde_json::to_string(row)?);
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageImage;

    #[test]
    fn test_rows_carry_identity() {
        let mut dataset = FlattenedDataset::new();
        dataset.append_job(
            "a.pdf",
            &[PageRecord::new(1, "p1", "<p>p1</p>"), PageRecord::new(2, "p2", "")],
        );
        dataset.append_job("b.pdf", &[PageRecord::new(1, "x", "")]);

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.rows()[2].document, "b.pdf");
        assert_eq!(dataset.rows()[1].page, 2);
    }

    #[test]
    fn test_image_fields_absent_without_image() {
        let mut dataset = FlattenedDataset::new();
        dataset.append_job("a.pdf", &[PageRecord::new(1, "t", "m")]);
        let jsonl = dataset.to_jsonl().unwrap();
        assert!(!jsonl.contains("image_width"));
        assert!(jsonl.ends_with('\n'));
    }

    #[test]
    fn test_image_bytes_base64() {
        let page = PageRecord::new(1, "t", "m").with_image(PageImage::new(2, 2, vec![0, 1, 2]));
        let mut dataset = FlattenedDataset::new();
        dataset.append_job("a.pdf", &[page]);
        let jsonl = dataset.to_jsonl().unwrap();
        assert!(jsonl.contains("\"image_width\":2"));
        assert!(jsonl.contains("\"image_bytes\":\"AAEC\""));
    }
}
