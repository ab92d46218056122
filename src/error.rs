use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for capture and matching operations.
pub type FinderResult<T> = Result<T, FinderError>;

/// The error type for every capture, matching and rendering operation.
#[derive(Debug, Error)]
pub enum FinderError {
    #[error("No visible window title contains '{title}'")]
    WindowNotFound { title: String },

    #[error("Screen capture failed: {description}")]
    CaptureFailed { description: String },

    #[error("Window capture is not available in this build (enable the 'window-capture' feature)")]
    CaptureUnsupported,

    #[error("Failed to load screenshot {path:?}: {source}")]
    ScreenshotLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to save image to {path:?}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Template file not found: {path:?}")]
    TemplateNotFound { path: PathBuf },

    #[error("Template {path:?} could not be decoded: {source}")]
    TemplateDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Threshold {value} is outside the correlation range [-1, 1]")]
    InvalidThreshold { value: f32 },

    #[error("Invalid argument: {description}")]
    InvalidArgument { description: String },

    #[error("Failed to serialize match report: {source}")]
    Report {
        #[from]
        source: serde_json::Error,
    },
}

impl FinderError {
    /// Short text shown in place of the image when an action fails.
    pub fn status_message(&self) -> String {
        match self {
            FinderError::WindowNotFound { title } => {
                format!("Capture failed, make sure a window titled '{title}' is open")
            }
            FinderError::CaptureFailed { .. }
            | FinderError::CaptureUnsupported
            | FinderError::ScreenshotLoad { .. } => format!("Capture failed: {self}"),
            FinderError::TemplateNotFound { path } => {
                format!("Template missing: {}", path.display())
            }
            FinderError::TemplateDecode { path, .. } => {
                format!("Template unreadable: {}", path.display())
            }
            _ => format!("Capture error: {self}"),
        }
    }

    /// Errors caused by the template asset rather than the captured frame.
    pub fn is_template_error(&self) -> bool {
        matches!(
            self,
            FinderError::TemplateNotFound { .. } | FinderError::TemplateDecode { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_not_found_status_names_title() {
        let err = FinderError::WindowNotFound {
            title: "Endfield".to_string(),
        };
        assert!(err.status_message().contains("Endfield"));
        assert!(!err.is_template_error());
    }

    #[test]
    fn test_template_errors_are_classified() {
        let err = FinderError::TemplateNotFound {
            path: PathBuf::from("resource/Zipline.png"),
        };
        assert!(err.is_template_error());
        assert!(err.status_message().contains("Zipline.png"));
    }
}
