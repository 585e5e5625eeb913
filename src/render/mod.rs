//! Rendering module: the synchronized output representations of a
//! document model.
//!
//! All renderers walk the same element stream in the same order and
//! reference the same generated image list, so heading levels, table
//! numbering, and image correspondence agree across every output.

mod annotated;
mod html;
mod markdown;
mod options;
mod record;

pub use annotated::to_annotated_text;
pub use html::to_html;
pub use markdown::to_markdown;
pub use options::{ImageRefMode, RenderOptions};
pub use record::{to_record, RecordFormat};
