//! Document model types for parsed document content.
//!
//! This module defines the intermediate representation that bridges the
//! external parsing engine and the export pipeline. The model is
//! format-agnostic: the adapter normalizes whatever the engine returns
//! into an ordered element stream plus per-page side data.

mod document;
mod element;
mod page;
mod table;

pub use document::{sanitize_stem, DocumentModel, GeneratedImage};
pub use element::Element;
pub use page::{PageImage, PageRecord};
pub use table::{Table, TableRow};

pub(crate) use table::escape_html;
