//! Per-page side data.

use serde::{Deserialize, Serialize};

/// Side data for one page of a document, used to build the flattened
/// dataset. Independent of the element stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// Page number (1-indexed)
    pub number: u32,

    /// Plain text of the page
    pub text: String,

    /// Markup fragment of the page
    pub markup: String,

    /// Rendered page image, if the engine generated one
    pub image: Option<PageImage>,
}

impl PageRecord {
    /// Create a page record without an image.
    pub fn new(number: u32, text: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            markup: markup.into(),
            image: None,
        }
    }

    /// Attach a page image.
    pub fn with_image(mut self, image: PageImage) -> Self {
        self.image = Some(image);
        self
    }
}

/// A rendered page image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageImage {
    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Raw image bytes; excluded from the machine record
    #[serde(skip_serializing, default)]
    pub bytes: Vec<u8>,
}

impl PageImage {
    /// Create a page image.
    pub fn new(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        Self {
            width,
            height,
            bytes,
        }
    }
}
