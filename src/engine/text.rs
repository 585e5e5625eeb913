//! Built-in reference engine for plain-text and Markdown inputs.
//!
//! Real deployments plug in an external layout/OCR engine through the
//! [`ParsingEngine`] trait; this engine exists so the pipeline is
//! exercisable end to end on text-based formats without one. It performs
//! no layout inference beyond line-level heading detection.

use super::{check_byte_limit, DocumentInput, InputFormat, ParsingEngine};
use crate::error::{Error, Result};
use crate::model::{DocumentModel, Element, PageRecord};
use crate::settings::Settings;
use std::path::Path;

const SUPPORTED: &[InputFormat] = &[InputFormat::Markdown, InputFormat::Text];

/// Line-based engine: `#`-prefixed lines become headings, blank lines
/// separate paragraphs, the whole input is one page.
#[derive(Debug, Default)]
pub struct TextEngine;

impl TextEngine {
    /// Create a new text engine.
    pub fn new() -> Self {
        Self
    }
}

impl ParsingEngine for TextEngine {
    fn name(&self) -> &str {
        "text"
    }

    fn supported_formats(&self) -> &[InputFormat] {
        SUPPORTED
    }

    fn parse(
        &self,
        input: &DocumentInput,
        _job_dir: &Path,
        settings: &Settings,
    ) -> Result<DocumentModel> {
        check_byte_limit(input, settings)?;

        let text = std::str::from_utf8(&input.bytes).map_err(|e| Error::Parse {
            name: input.name.clone(),
            cause: format!("input is not valid UTF-8: {e}"),
        })?;

        let mut model = DocumentModel::new(input.stem());
        let markdown = input.format == InputFormat::Markdown;

        for block in split_blocks(text) {
            if markdown {
                if let Some((level, heading)) = parse_heading(&block) {
                    model.push_element(Element::heading(level, heading));
                    continue;
                }
            }
            model.push_element(Element::text(block));
        }

        model.pages.push(PageRecord::new(
            1,
            text.trim().to_string(),
            text.trim().to_string(),
        ));

        Ok(model)
    }
}

/// Split text into paragraph blocks on blank lines.
fn split_blocks(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .collect()
}

/// Parse a `#`-run heading line. Returns None for non-heading blocks and
/// for runs deeper than six.
fn parse_heading(block: &str) -> Option<(u8, String)> {
    if block.contains('\n') {
        return None;
    }
    let hashes = block.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = block[hashes..].strip_prefix(' ')?;
    Some((hashes as u8, rest.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Element;

    fn parse(name: &str, text: &str) -> DocumentModel {
        let input = DocumentInput::from_name(name, text.as_bytes().to_vec()).unwrap();
        TextEngine::new()
            .parse(&input, Path::new("/tmp"), &Settings::default())
            .unwrap()
    }

    #[test]
    fn test_markdown_headings() {
        let model = parse("doc.md", "# Title\n\nbody text\n\n## Section");
        assert_eq!(model.elements.len(), 3);
        assert!(matches!(
            model.elements[0],
            Element::Heading { level: 1, .. }
        ));
        assert!(matches!(model.elements[1], Element::TextBlock { .. }));
        assert!(matches!(
            model.elements[2],
            Element::Heading { level: 2, .. }
        ));
    }

    #[test]
    fn test_plain_text_never_headings() {
        let model = parse("notes.txt", "# not a heading in txt");
        assert!(matches!(model.elements[0], Element::TextBlock { .. }));
    }

    #[test]
    fn test_single_page_side_data() {
        let model = parse("doc.md", "# Title\n\nbody");
        assert_eq!(model.pages.len(), 1);
        assert_eq!(model.pages[0].number, 1);
        assert!(model.pages[0].text.contains("body"));
    }

    #[test]
    fn test_invalid_utf8_is_parse_failure() {
        let input = DocumentInput::new("bad.txt", vec![0xFF, 0xFE], InputFormat::Text);
        let result = TextEngine::new().parse(&input, Path::new("/tmp"), &Settings::default());
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn test_heading_parser_edges() {
        assert_eq!(parse_heading("## Two"), Some((2, "Two".to_string())));
        assert_eq!(parse_heading("####### seven"), None);
        assert_eq!(parse_heading("#nospace"), None);
    }
}
