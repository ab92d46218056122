//! Template matching data types
use image::{ImageBuffer, Luma};
use serde::Serialize;
use std::path::Path;

/// A single match result
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Match {
    /// X coordinate of the template's top-left corner in the searched image
    pub x: u32,
    /// Y coordinate of the template's top-left corner in the searched image
    pub y: u32,
    /// Masked normalized cross-correlation at this offset (-1.0..=1.0)
    pub confidence: f32,
}

impl Match {
    pub fn new(x: u32, y: u32, confidence: f32) -> Self {
        Self { x, y, confidence }
    }

    /// Center of the matched box for a template of the given size
    pub fn center(&self, template_width: u32, template_height: u32) -> (u32, u32) {
        (self.x + template_width / 2, self.y + template_height / 2)
    }
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{}) conf={:.3}", self.x, self.y, self.confidence)
    }
}

/// Correlation surface produced by a full scan.
///
/// One value per template offset. Offsets where the correlation is undefined
/// (the image window has no variance under the mask) hold `NaN`.
#[derive(Clone, Debug)]
pub struct ResponseMap {
    scores: ImageBuffer<Luma<f32>, Vec<f32>>,
    origin_x: u32,
    origin_y: u32,
}

impl ResponseMap {
    pub(crate) fn new(width: u32, height: u32, origin_x: u32, origin_y: u32) -> Self {
        Self {
            scores: ImageBuffer::from_pixel(width, height, Luma([f32::NAN])),
            origin_x,
            origin_y,
        }
    }

    pub(crate) fn set(&mut self, x: u32, y: u32, score: f32) {
        self.scores.put_pixel(x, y, Luma([score]));
    }

    pub fn width(&self) -> u32 {
        self.scores.width()
    }

    pub fn height(&self) -> u32 {
        self.scores.height()
    }

    /// Offset of the surface's (0,0) in full-image coordinates
    pub fn origin(&self) -> (u32, u32) {
        (self.origin_x, self.origin_y)
    }

    /// Score at a surface position, `None` when out of range or undefined
    pub fn score_at(&self, x: u32, y: u32) -> Option<f32> {
        self.scores
            .get_pixel_checked(x, y)
            .map(|p| p[0])
            .filter(|v| !v.is_nan())
    }

    /// Every position scoring at or above `threshold`, in full-image
    /// coordinates, row-major (y outer, x inner).
    pub fn matches_above(&self, threshold: f32) -> Vec<Match> {
        self.scores
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] >= threshold)
            .map(|(x, y, p)| Match::new(self.origin_x + x, self.origin_y + y, p[0]))
            .collect()
    }

    /// Highest defined score and its full-image position
    pub fn peak(&self) -> Option<Match> {
        self.scores
            .enumerate_pixels()
            .filter(|(_, _, p)| !p[0].is_nan())
            .map(|(x, y, p)| Match::new(self.origin_x + x, self.origin_y + y, p[0]))
            .reduce(|best, m| if m.confidence > best.confidence { m } else { best })
    }
}

/// Serializable summary of one matching call
#[derive(Clone, Debug, Serialize)]
pub struct MatchReport {
    pub template: String,
    pub template_width: u32,
    pub template_height: u32,
    pub threshold: f32,
    pub display_threshold: f32,
    pub match_count: usize,
    pub best: Option<Match>,
    pub matches: Vec<Match>,
}

impl MatchReport {
    pub fn new(
        template_path: &Path,
        template_size: (u32, u32),
        threshold: f32,
        display_threshold: f32,
        matches: Vec<Match>,
    ) -> Self {
        let best = super::find_best_match(&matches);
        Self {
            template: template_path.display().to_string(),
            template_width: template_size.0,
            template_height: template_size.1,
            threshold,
            display_threshold,
            match_count: matches.len(),
            best,
            matches,
        }
    }

    /// Matches that would be drawn at the report's display threshold
    pub fn displayed(&self) -> impl Iterator<Item = &Match> {
        self.matches
            .iter()
            .filter(move |m| m.confidence >= self.display_threshold)
    }
}
