//! Zipline icon matching
//!
//! Loads the zipline template, derives its comparison mask, scans captured
//! frames and draws the results.

pub mod config;
pub mod detector;
pub mod region;
pub mod render;
pub mod template;


// Re-export main types and functions
pub use config::{
    DEFAULT_DISPLAY_THRESHOLD, DEFAULT_MATCH_THRESHOLD, DEFAULT_TEMPLATE_PATH, DEFAULT_WINDOW_TITLE,
    MatchConfig, create_default_config, create_loose_config, create_strict_config,
};
pub use detector::{DetectionResult, ZiplineDetector};
pub use region::SearchRegion;
pub use render::{MATCH_COLOR, TemplateSize, draw_matches, load_label_font};
pub use template::{Template, load_template_image, template_dimensions};
