//! Rendering options.

use std::path::PathBuf;

/// How renderings reference generated image files.
///
/// One batch-level choice, applied uniformly to every rendering of a
/// document so all outputs point at the same assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageRefMode {
    /// Link to the sibling file by name
    #[default]
    Referenced,
    /// Embed the image bytes as a base64 data URI
    Embedded,
}

/// Options for rendering document content.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Image reference mode
    pub image_ref_mode: ImageRefMode,

    /// Directory holding the generated image files; required for
    /// embedded mode, used to resolve bytes
    pub image_dir: Option<PathBuf>,
}

impl RenderOptions {
    /// Create render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image reference mode.
    pub fn with_image_ref_mode(mut self, mode: ImageRefMode) -> Self {
        self.image_ref_mode = mode;
        self
    }

    /// Set the image directory.
    pub fn with_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.image_dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.image_ref_mode, ImageRefMode::Referenced);
        assert!(options.image_dir.is_none());
    }
}
