//! Album cover previews
//!
//! Covers are never copied or resized; the preview only records where the
//! image lives and how large it is.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Text shown when no cover is selected
pub const COVER_PLACEHOLDER: &str = "Album cover preview (PNG)";

/// Text shown when a cover exists but cannot be decoded
pub const COVER_UNREADABLE: &str = "Cannot load image";

/// A decoded cover image's location and size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverPreview {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl CoverPreview {
    /// Probe the image at `path` for its dimensions
    pub fn load(path: &Path) -> Result<Self> {
        let (width, height) = image::image_dimensions(path)
            .with_context(|| format!("Failed to read cover image: {}", path.display()))?;

        log::debug!("Cover {:?} is {}x{}", path, width, height);
        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
        })
    }

    /// One-line description for the details view
    pub fn describe(&self) -> String {
        format!("{} ({}x{})", self.path.display(), self.width, self.height)
    }
}
