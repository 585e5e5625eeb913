//! Element types for the ordered document stream.

use super::Table;
use serde::{Deserialize, Serialize};

/// One structural unit of a document model.
///
/// The stream is a closed set of variants so that every consumer
/// dispatches by exhaustive match; a new element kind is a
/// compile-time-visible gap in every renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// A heading with a 1-based level
    Heading {
        /// Heading level (1 = top)
        level: u8,
        /// Heading text
        text: String,
    },

    /// A paragraph of plain text
    TextBlock {
        /// Paragraph text
        text: String,
    },

    /// A table with row/column export capability
    Table(Table),

    /// A picture; carries no filename itself. The Nth picture in the
    /// stream corresponds to the Nth generated image file.
    Picture,
}

impl Element {
    /// Create a heading element.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Element::Heading {
            level: level.max(1),
            text: text.into(),
        }
    }

    /// Create a text block element.
    pub fn text(text: impl Into<String>) -> Self {
        Element::TextBlock { text: text.into() }
    }

    /// Check if this element is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Element::Table(_))
    }

    /// Check if this element is a picture.
    pub fn is_picture(&self) -> bool {
        matches!(self, Element::Picture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_floor() {
        let el = Element::heading(0, "Intro");
        assert!(matches!(el, Element::Heading { level: 1, .. }));
    }

    #[test]
    fn test_element_predicates() {
        assert!(Element::Picture.is_picture());
        assert!(!Element::text("hi").is_table());
        assert!(Element::Table(Table::new()).is_table());
    }
}
