//! HTML-like rendering.

use super::markdown::{image_name, image_target};
use super::RenderOptions;
use crate::error::Result;
use crate::model::{DocumentModel, Element};

/// Convert a document model to a minimal HTML document.
///
/// Basic structural translation only: headings, paragraphs, tables, and
/// image references, in stream order.
pub fn to_html(model: &DocumentModel, options: &RenderOptions) -> Result<String> {
    let mut body: Vec<String> = Vec::new();
    let mut image_index = 0usize;

    for element in &model.elements {
        match element {
            Element::Heading { level, text } => {
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                let level = (*level).min(6);
                body.push(format!("<h{level}>{}</h{level}>", escape(text)));
            }
            Element::TextBlock { text } => {
                let text = text.trim();
                if !text.is_empty() {
                    body.push(format!("<p>{}</p>", escape(text)));
                }
            }
            Element::Table(table) => {
                if !table.is_empty() {
                    body.push(table.to_html());
                }
            }
            Element::Picture => {
                let name = image_name(model, image_index);
                let target = image_target(model, image_index, options)?;
                image_index += 1;
                body.push(format!("<img src=\"{target}\" alt=\"{}\">", escape(&name)));
            }
        }
    }

    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>",
        escape(&model.stem),
        body.join("\n")
    ))
}

fn escape(text: &str) -> String {
    crate::model::escape_html(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GeneratedImage, Table};

    #[test]
    fn test_html_structure() {
        let mut model = DocumentModel::new("doc");
        model.push_element(Element::heading(2, "Section"));
        model.push_element(Element::text("a < b"));
        model.push_element(Element::Table(Table::from_rows(vec![vec!["h"], vec!["v"]])));
        model.push_element(Element::Picture);
        model.push_image(GeneratedImage::new("doc_img_1.png", 10, 10));

        let html = to_html(&model, &RenderOptions::default()).unwrap();
        assert!(html.contains("<h2>Section</h2>"));
        assert!(html.contains("<p>a &lt; b</p>"));
        assert!(html.contains("<table>"));
        assert!(html.contains("<img src=\"doc_img_1.png\""));
    }

    #[test]
    fn test_same_image_names_as_markdown() {
        let mut model = DocumentModel::new("doc");
        model.push_element(Element::Picture);
        // No generated image: both renderings use the synthesized name.
        let html = to_html(&model, &RenderOptions::default()).unwrap();
        let md = super::super::to_markdown(&model, &RenderOptions::default()).unwrap();
        assert!(html.contains("doc_img_1.png"));
        assert!(md.contains("doc_img_1.png"));
    }
}
