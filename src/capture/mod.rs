// Capture module - screenshots of the game window
// A provider turns a window title substring into one RGB frame. The file
// provider serves saved screenshots; live capture needs the
// `window-capture` feature.

pub mod types;
#[cfg(feature = "window-capture")]
pub mod window;

pub use types::{CaptureProvider, FileCapture, UnsupportedCapture, WindowInfo, find_window};
#[cfg(feature = "window-capture")]
pub use window::WindowCapture;

/// Live window capture when compiled in, otherwise a provider that reports
/// the missing feature.
pub fn default_provider() -> Box<dyn CaptureProvider> {
    #[cfg(feature = "window-capture")]
    {
        Box::new(WindowCapture::new())
    }
    #[cfg(not(feature = "window-capture"))]
    {
        Box::new(UnsupportedCapture)
    }
}
