//! Machine-readable record rendering.

use crate::error::{Error, Result};
use crate::model::DocumentModel;

/// Record output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize the full document model as a machine-readable record.
///
/// The record is a structural serialization of the same model the other
/// renderings walk, so it references the same generated image names.
pub fn to_record(model: &DocumentModel, format: RecordFormat) -> Result<String> {
    let result = match format {
        RecordFormat::Pretty => serde_json::to_string_pretty(model),
        RecordFormat::Compact => serde_json::to_string(model),
    };

    result.map_err(|e| Error::Render {
        format: "record".to_string(),
        cause: e.to_string(),
    })
}
