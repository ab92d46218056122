// Capture provider types and the file-backed provider
use crate::error::{FinderError, FinderResult};
use image::RgbImage;
use std::path::{Path, PathBuf};

/// Produces a single RGB frame of the window whose title contains
/// `window_title`.
pub trait CaptureProvider {
    fn capture(&self, window_title: &str) -> FinderResult<RgbImage>;

    /// Human readable backend name for logs
    fn name(&self) -> &str;
}

/// Minimal view of an enumerated window, enough to pick one by title
#[derive(Debug, Clone, PartialEq)]
pub struct WindowInfo {
    pub title: String,
    pub visible: bool,
}

/// Index of the first visible window whose title contains `needle`,
/// compared case-insensitively.
pub fn find_window(windows: &[WindowInfo], needle: &str) -> Option<usize> {
    let needle = needle.to_lowercase();
    windows
        .iter()
        .position(|w| w.visible && w.title.to_lowercase().contains(&needle))
}

/// Serves a screenshot saved on disk; the title is only logged.
#[derive(Debug, Clone)]
pub struct FileCapture {
    path: PathBuf,
}

impl FileCapture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CaptureProvider for FileCapture {
    fn capture(&self, window_title: &str) -> FinderResult<RgbImage> {
        log::debug!(
            "📸 Loading screenshot {} in place of window '{}'",
            self.path.display(),
            window_title
        );
        image::open(&self.path)
            .map(|img| img.to_rgb8())
            .map_err(|source| FinderError::ScreenshotLoad {
                path: self.path.clone(),
                source,
            })
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// Placeholder provider for builds without window capture support
#[derive(Debug, Clone, Default)]
pub struct UnsupportedCapture;

impl CaptureProvider for UnsupportedCapture {
    fn capture(&self, _window_title: &str) -> FinderResult<RgbImage> {
        Err(FinderError::CaptureUnsupported)
    }

    fn name(&self) -> &str {
        "unsupported"
    }
}
