//! Structured markup (Markdown) rendering.

use super::{ImageRefMode, RenderOptions};
use crate::error::Result;
use crate::model::{DocumentModel, Element, GeneratedImage};
use base64::Engine as _;

/// Convert a document model to Markdown.
///
/// Walks the same element stream as the reconciler, so heading levels
/// and image correspondence agree with the annotated text.
pub fn to_markdown(model: &DocumentModel, options: &RenderOptions) -> Result<String> {
    let mut blocks: Vec<String> = Vec::new();
    let mut image_index = 0usize;

    for element in &model.elements {
        match element {
            Element::Heading { level, text } => {
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                let level = (*level).min(6);
                blocks.push(format!("{} {}", "#".repeat(level as usize), text));
            }
            Element::TextBlock { text } => {
                let text = text.trim();
                if !text.is_empty() {
                    blocks.push(text.to_string());
                }
            }
            Element::Table(table) => {
                if let Some(ref caption) = table.caption {
                    blocks.push(format!("*{caption}*"));
                }
                if !table.is_empty() {
                    blocks.push(table.to_markdown());
                }
            }
            Element::Picture => {
                let name = image_name(model, image_index);
                let target = image_target(model, image_index, options)?;
                image_index += 1;
                blocks.push(format!("![{name}]({target})"));
            }
        }
    }

    Ok(blocks.join("\n\n"))
}

/// Name of the nth generated image, falling back to the synthesized
/// scheme when the list is shorter than the picture count.
pub(super) fn image_name(model: &DocumentModel, index: usize) -> String {
    model
        .images
        .get(index)
        .map(|img| img.file_name.clone())
        .unwrap_or_else(|| GeneratedImage::numbered_name(&model.stem, index + 1))
}

/// Resolve the reference target for the nth image: the file name in
/// referenced mode, a base64 data URI in embedded mode.
pub(super) fn image_target(
    model: &DocumentModel,
    index: usize,
    options: &RenderOptions,
) -> Result<String> {
    let name = image_name(model, index);
    match options.image_ref_mode {
        ImageRefMode::Referenced => Ok(name),
        ImageRefMode::Embedded => {
            let Some(dir) = options.image_dir.as_ref() else {
                // Without a directory there is nothing to embed.
                return Ok(name);
            };
            let path = dir.join(&name);
            match std::fs::read(&path) {
                Ok(bytes) => Ok(format!(
                    "data:image/png;base64,{}",
                    base64::engine::general_purpose::STANDARD.encode(bytes)
                )),
                // Placeholder names have no file on disk; fall back to a
                // plain reference rather than failing the rendering.
                Err(_) => Ok(name),
            }
        }
    }
}
