//! Annotated flat-text reconciliation.
//!
//! A single ordered pass over the element stream interleaves heading
//! markers, plain text, serialized tables, and image placeholders into
//! one narrative. Table labels are numbered in encounter order and image
//! placeholders resolve positionally against the generated image list,
//! so the narrative stays aligned with the CSV and raster artifacts.

use crate::model::{DocumentModel, Element, GeneratedImage};

/// Label emitted in place of a table whose export failed.
const UNAVAILABLE: &str = "<unavailable>";

/// Render a document model as annotated flat text.
///
/// Deterministic: the element stream's order is authoritative, and
/// re-running on the same model yields byte-identical output. Table
/// numbering increments even when an individual export fails, keeping
/// ordinals aligned with the per-table CSV artifacts.
pub fn to_annotated_text(model: &DocumentModel) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut table_index = 0usize;
    let mut image_index = 0usize;

    for element in &model.elements {
        match element {
            Element::Heading { level, text } => {
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                blocks.push(format!("{} {}", "#".repeat(*level as usize), text));
            }
            Element::Table(table) => {
                table_index += 1;
                let body = match table.export_rows() {
                    Ok(_) => table.to_text_grid(),
                    Err(e) => {
                        log::warn!(
                            "table {table_index} in '{}' not exportable: {e}",
                            model.stem
                        );
                        UNAVAILABLE.to_string()
                    }
                };
                blocks.push(format!("[Table {table_index}]\n{body}"));
            }
            Element::Picture => {
                let name = model
                    .images
                    .get(image_index)
                    .map(|img| img.file_name.clone())
                    .unwrap_or_else(|| {
                        GeneratedImage::numbered_name(&model.stem, image_index + 1)
                    });
                image_index += 1;
                blocks.push(format!("[Image: {name}]"));
            }
            Element::TextBlock { text } => {
                let text = text.trim();
                if !text.is_empty() {
                    blocks.push(text.to_string());
                }
            }
        }
    }

    blocks.join("\n\n")
}
