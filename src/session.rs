// Capture -> match -> render action
// The displayed image is returned to the caller instead of living in a
// shared widget, and every failure becomes placeholder text.

use crate::capture::CaptureProvider;
use crate::display::fit_to_display;
use crate::error::FinderResult;
use crate::match_image::{DetectionResult, MatchConfig, ZiplineDetector};
use crate::template_matching::{Match, MatchReport};
use image::RgbImage;

/// Text shown before the first capture
pub const WAITING_TEXT: &str = "Waiting for capture...";
/// Text shown when the frame holds no match
pub const NO_MATCH_TEXT: &str = "No zipline found";

/// What the display area should show after one action
#[derive(Debug, Clone)]
pub enum DisplayOutcome {
    /// Frame with boxes drawn for matches above the display threshold
    Annotated {
        image: RgbImage,
        report: MatchReport,
    },
    /// Frame captured, nothing matched the template
    NoMatch { image: RgbImage },
    /// Capture or matching failed; the text explains why
    Placeholder(String),
}

impl DisplayOutcome {
    pub fn status_text(&self) -> String {
        match self {
            DisplayOutcome::Annotated { report, .. } => match report.best {
                Some(best) => format!("{} matches, best {}", report.match_count, best),
                None => format!("{} matches", report.match_count),
            },
            DisplayOutcome::NoMatch { .. } => NO_MATCH_TEXT.to_string(),
            DisplayOutcome::Placeholder(text) => text.clone(),
        }
    }

    /// Image to display, if any
    pub fn image(&self) -> Option<&RgbImage> {
        match self {
            DisplayOutcome::Annotated { image, .. } | DisplayOutcome::NoMatch { image } => Some(image),
            DisplayOutcome::Placeholder(_) => None,
        }
    }

    pub fn best_match(&self) -> Option<Match> {
        match self {
            DisplayOutcome::Annotated { report, .. } => report.best,
            _ => None,
        }
    }

    /// Pretty JSON document describing the outcome. Outcomes without a
    /// report serialize as an empty match list plus the status text.
    pub fn to_json(&self) -> FinderResult<String> {
        let text = match self {
            DisplayOutcome::Annotated { report, .. } => serde_json::to_string_pretty(report)?,
            other => serde_json::to_string_pretty(&serde_json::json!({
                "match_count": 0,
                "best": null,
                "matches": [],
                "status": other.status_text(),
            }))?,
        };
        Ok(text)
    }
}

/// One user-facing session: a detector plus where frames come from.
pub struct FinderSession {
    detector: ZiplineDetector,
    provider: Box<dyn CaptureProvider>,
    display_size: Option<(u32, u32)>,
}

impl FinderSession {
    pub fn new(config: MatchConfig, provider: Box<dyn CaptureProvider>) -> Self {
        Self {
            detector: ZiplineDetector::new(config),
            provider,
            display_size: None,
        }
    }

    /// Scale returned images to fit `max_w` x `max_h`
    pub fn with_display_size(mut self, max_w: u32, max_h: u32) -> Self {
        self.display_size = Some((max_w, max_h));
        self
    }

    pub fn config(&self) -> &MatchConfig {
        self.detector.get_config()
    }

    pub fn detector(&self) -> &ZiplineDetector {
        &self.detector
    }

    /// Capture a frame and match it, propagating any failure
    pub fn capture_and_match(&self) -> FinderResult<(RgbImage, DetectionResult)> {
        let title = &self.config().window_title;
        log::debug!("📸 Capturing '{}' via {} provider", title, self.provider.name());
        let frame = self.provider.capture(title)?;
        let result = self.detector.analyze(&frame)?;
        Ok((frame, result))
    }

    /// Run one capture action. Never fails: errors are logged and turned
    /// into placeholder text so the session stays usable.
    pub fn run(&self) -> DisplayOutcome {
        let (frame, result) = match self.capture_and_match() {
            Ok(out) => out,
            Err(e) => {
                log::error!("❌ Capture action failed: {e}");
                return DisplayOutcome::Placeholder(e.status_message());
            }
        };

        if !result.has_matches() {
            log::info!("{} in {}x{} frame", NO_MATCH_TEXT, frame.width(), frame.height());
            return DisplayOutcome::NoMatch {
                image: self.fit(frame),
            };
        }

        let annotated = self.detector.draw_result(&frame, &result);
        DisplayOutcome::Annotated {
            image: self.fit(annotated),
            report: self.detector.report(&result),
        }
    }

    fn fit(&self, image: RgbImage) -> RgbImage {
        match self.display_size {
            Some((w, h)) => fit_to_display(&image, w, h),
            None => image,
        }
    }
}
