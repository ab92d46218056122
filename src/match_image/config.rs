//! Configuration for zipline matching

use super::region::SearchRegion;
use crate::template_matching::{GREEN_SCREEN_RANGE, HsvRange, MaskMode};
use std::path::PathBuf;

/// Template asset looked up when no other path is given
pub const DEFAULT_TEMPLATE_PATH: &str = "resource/Zipline.png";
/// Window title substring of the game client
pub const DEFAULT_WINDOW_TITLE: &str = "Endfield";
/// Minimum correlation for an offset to be reported as a match
pub const DEFAULT_MATCH_THRESHOLD: f32 = 0.7;
/// Minimum correlation for a match to be drawn
pub const DEFAULT_DISPLAY_THRESHOLD: f32 = 0.8;

#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Template image to search for
    pub template_path: PathBuf,
    /// Window title substring handed to the capture provider
    pub window_title: String,
    /// Confidence threshold for template matching (-1.0 to 1.0)
    pub confidence_threshold: f32,
    /// Confidence threshold for drawing a match, independent of the above
    pub display_threshold: f32,
    /// How the comparison mask is derived from the template
    pub mask_mode: MaskMode,
    /// Green screen band for HSV keyed templates
    pub green_range: HsvRange,
    /// Restrict the scan to part of the frame
    pub search_region: Option<SearchRegion>,
    /// Font for confidence labels; the bundled font is used when unset
    pub label_font: Option<PathBuf>,
    /// Draw confidence labels next to boxes
    pub draw_labels: bool,
    /// Debug mode flag
    pub debug_enabled: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
            confidence_threshold: DEFAULT_MATCH_THRESHOLD,
            display_threshold: DEFAULT_DISPLAY_THRESHOLD,
            mask_mode: MaskMode::Auto,
            green_range: GREEN_SCREEN_RANGE,
            search_region: None,
            label_font: None,
            draw_labels: true,
            debug_enabled: false,
        }
    }
}

/// Default configuration: report at 0.7, draw at 0.8
pub fn create_default_config() -> MatchConfig {
    MatchConfig::default()
}

/// Configuration preset that only reports near-identical hits
pub fn create_strict_config() -> MatchConfig {
    MatchConfig {
        confidence_threshold: 0.9,
        display_threshold: 0.9,
        ..MatchConfig::default()
    }
}

/// Configuration preset for scaled or blurred captures
pub fn create_loose_config() -> MatchConfig {
    MatchConfig {
        confidence_threshold: 0.5,
        display_threshold: 0.6,
        ..MatchConfig::default()
    }
}
