// Live window capture through xcap
use super::types::{CaptureProvider, WindowInfo, find_window};
use crate::error::{FinderError, FinderResult};
use image::{DynamicImage, RgbImage, RgbaImage};
use xcap::Window;

fn window_infos(windows: &[Window]) -> Vec<WindowInfo> {
    windows
        .iter()
        .map(|w| WindowInfo {
            title: w.title().to_string(),
            visible: !w.is_minimized(),
        })
        .collect()
}

/// Captures the first visible window whose title contains the requested
/// substring.
#[derive(Debug, Clone, Default)]
pub struct WindowCapture;

impl WindowCapture {
    pub fn new() -> Self {
        Self
    }

    /// Titles of every window currently enumerated
    pub fn list_windows() -> FinderResult<Vec<WindowInfo>> {
        let windows = Window::all().map_err(|e| FinderError::CaptureFailed {
            description: format!("Failed to enumerate windows: {e}"),
        })?;
        Ok(window_infos(&windows))
    }

    fn raise(window: &Window) {
        // xcap only reads window contents; it cannot change stacking order
        log::warn!(
            "⚠️ Could not bring '{}' to the foreground, capturing it in place",
            window.title()
        );
    }
}

impl CaptureProvider for WindowCapture {
    fn capture(&self, window_title: &str) -> FinderResult<RgbImage> {
        let windows = Window::all().map_err(|e| FinderError::CaptureFailed {
            description: format!("Failed to enumerate windows: {e}"),
        })?;
        let index = find_window(&window_infos(&windows), window_title).ok_or_else(|| FinderError::WindowNotFound {
            title: window_title.to_string(),
        })?;
        let window = &windows[index];
        log::info!(
            "🪟 Capturing '{}' ({}x{})",
            window.title(),
            window.width(),
            window.height()
        );
        Self::raise(window);

        let captured = window.capture_image().map_err(|e| FinderError::CaptureFailed {
            description: format!("{e}"),
        })?;
        let (width, height) = captured.dimensions();
        let rgba = RgbaImage::from_raw(width, height, captured.into_raw()).ok_or_else(|| {
            FinderError::CaptureFailed {
                description: format!("capture buffer does not match {width}x{height}"),
            }
        })?;
        Ok(DynamicImage::ImageRgba8(rgba).to_rgb8())
    }

    fn name(&self) -> &str {
        "xcap"
    }
}
