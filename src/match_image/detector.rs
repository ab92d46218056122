//! Zipline detection: template load, masked scan, thresholding and drawing

use super::{
    config::MatchConfig,
    render::{TemplateSize, draw_matches, load_label_font},
    template::Template,
};
use crate::error::FinderResult;
use crate::template_matching::{Match, MatchReport, ResponseMap, find_best_match, validate_threshold};
use image::RgbImage;

#[derive(Debug, Clone)]
pub struct DetectionResult {
    pub matches: Vec<Match>,
    pub template_width: u32,
    pub template_height: u32,
    pub processing_time_ms: u128,
}

impl DetectionResult {
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn best_match(&self) -> Option<Match> {
        find_best_match(&self.matches)
    }

    /// Matches that clear a display threshold
    pub fn displayable(&self, display_threshold: f32) -> usize {
        self.matches
            .iter()
            .filter(|m| m.confidence >= display_threshold)
            .count()
    }
}

/// Finds the configured template in captured frames.
///
/// Holds no state between calls besides its configuration; the template is
/// read from disk on every call.
pub struct ZiplineDetector {
    config: MatchConfig,
}

impl ZiplineDetector {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    fn load_template(&self) -> FinderResult<Template> {
        Template::load(
            &self.config.template_path,
            self.config.mask_mode,
            &self.config.green_range,
        )
    }

    /// Full correlation surface over the configured search area.
    ///
    /// `None` when the template does not fit or cannot be correlated.
    pub fn response_map(&self, image: &RgbImage) -> FinderResult<Option<ResponseMap>> {
        let template = self.load_template()?;
        let prepared = template.prepare()?;
        Ok(prepared.scan(image, self.config.search_region.as_ref()))
    }

    /// Every offset scoring at or above the configured threshold
    pub fn find_matches(&self, image: &RgbImage) -> FinderResult<Vec<Match>> {
        Ok(self.analyze(image)?.matches)
    }

    /// Highest-confidence match at or above the configured threshold
    pub fn find_best_match(&self, image: &RgbImage) -> FinderResult<Option<Match>> {
        Ok(find_best_match(&self.find_matches(image)?))
    }

    /// Match the template against a frame and time the work
    pub fn analyze(&self, image: &RgbImage) -> FinderResult<DetectionResult> {
        let start_time = std::time::Instant::now();
        let threshold = validate_threshold(self.config.confidence_threshold)?;

        let template = self.load_template()?;
        let prepared = template.prepare()?;

        if self.config.debug_enabled {
            log::info!(
                "🔍 Matching '{}' {}x{} ({:.0}% compared) in {}x{} frame",
                template.name,
                template.width(),
                template.height(),
                template.compare_ratio() * 100.0,
                image.width(),
                image.height()
            );
        }

        let matches = prepared
            .scan(image, self.config.search_region.as_ref())
            .map(|map| map.matches_above(threshold))
            .unwrap_or_default();

        let result = DetectionResult {
            matches,
            template_width: template.width(),
            template_height: template.height(),
            processing_time_ms: start_time.elapsed().as_millis(),
        };

        if self.config.debug_enabled {
            self.log_detection_results(&result);
        }

        Ok(result)
    }

    /// Copy of `image` with boxes for matches above the display threshold.
    ///
    /// The box size is read from the template file; if that fails the frame
    /// is returned unannotated.
    pub fn draw_matches(&self, image: &RgbImage, matches: &[Match]) -> RgbImage {
        self.render(
            image,
            matches,
            TemplateSize::FromFile(&self.config.template_path),
        )
    }

    /// Draw a detection result using the template size it recorded
    pub fn draw_result(&self, image: &RgbImage, result: &DetectionResult) -> RgbImage {
        self.render(
            image,
            &result.matches,
            TemplateSize::Explicit {
                width: result.template_width,
                height: result.template_height,
            },
        )
    }

    fn render(&self, image: &RgbImage, matches: &[Match], size: TemplateSize<'_>) -> RgbImage {
        let font = if self.config.draw_labels {
            load_label_font(self.config.label_font.as_deref())
        } else {
            None
        };
        draw_matches(
            image,
            matches,
            self.config.display_threshold,
            size,
            font.as_ref(),
        )
    }

    /// Serializable summary of a detection
    pub fn report(&self, result: &DetectionResult) -> MatchReport {
        MatchReport::new(
            &self.config.template_path,
            (result.template_width, result.template_height),
            self.config.confidence_threshold,
            self.config.display_threshold,
            result.matches.clone(),
        )
    }

    fn log_detection_results(&self, result: &DetectionResult) {
        log::info!("🔍 Detection Results:");
        log::info!("  Processing time: {}ms", result.processing_time_ms);
        log::info!("  Matches found: {}", result.matches.len());
        log::info!(
            "  Drawable at {:.2}: {}",
            self.config.display_threshold,
            result.displayable(self.config.display_threshold)
        );
        if let Some(best) = result.best_match() {
            log::info!("  Best: {}", best);
        }
    }

    /// Update configuration
    pub fn update_config(&mut self, config: MatchConfig) {
        self.config = config;
    }

    /// Get current configuration
    pub fn get_config(&self) -> &MatchConfig {
        &self.config
    }
}
