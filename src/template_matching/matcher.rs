//! Masked template matching
//!
//! Normalized cross-correlation with per-channel mean removal, restricted to
//! the pixels a mask marks for comparison. Computed directly in double
//! precision, one window at a time.
use super::mask::IGNORE;
use super::types::{Match, ResponseMap};
use crate::error::{FinderError, FinderResult};
use crate::match_image::SearchRegion;
use image::{GrayImage, RgbImage};

/// Variances at or below this are treated as zero
const MIN_VARIANCE: f64 = 1e-6;

/// Template pixels prepared for scanning: only compared pixels are kept,
/// with their per-channel mean already removed.
#[derive(Clone, Debug)]
pub struct MaskedTemplate {
    width: u32,
    height: u32,
    points: Vec<(u32, u32)>,
    t_prime: Vec<[f64; 3]>,
    var_t: f64,
}

impl MaskedTemplate {
    /// Prepare a template and its mask. Both must have the same dimensions.
    pub fn new(template: &RgbImage, mask: &GrayImage) -> FinderResult<Self> {
        if template.dimensions() != mask.dimensions() {
            return Err(FinderError::InvalidArgument {
                description: format!(
                    "mask {}x{} does not match template {}x{}",
                    mask.width(),
                    mask.height(),
                    template.width(),
                    template.height()
                ),
            });
        }

        let points: Vec<(u32, u32)> = mask
            .enumerate_pixels()
            .filter(|(_, _, m)| m[0] != IGNORE)
            .map(|(x, y, _)| (x, y))
            .collect();

        let mut mean = [0.0f64; 3];
        for &(x, y) in &points {
            let p = template.get_pixel(x, y);
            for c in 0..3 {
                mean[c] += p[c] as f64;
            }
        }
        if !points.is_empty() {
            let n = points.len() as f64;
            for m in &mut mean {
                *m /= n;
            }
        }

        let t_prime: Vec<[f64; 3]> = points
            .iter()
            .map(|&(x, y)| {
                let p = template.get_pixel(x, y);
                [
                    p[0] as f64 - mean[0],
                    p[1] as f64 - mean[1],
                    p[2] as f64 - mean[2],
                ]
            })
            .collect();

        let var_t = t_prime
            .iter()
            .map(|t| t[0] * t[0] + t[1] * t[1] + t[2] * t[2])
            .sum();

        Ok(Self {
            width: template.width(),
            height: template.height(),
            points,
            t_prime,
            var_t,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels taking part in the correlation
    pub fn compare_count(&self) -> usize {
        self.points.len()
    }

    /// True when the correlation is undefined at every offset: nothing to
    /// compare, or the compared template pixels are a single flat color.
    pub fn is_degenerate(&self) -> bool {
        self.points.is_empty() || self.var_t <= MIN_VARIANCE
    }

    /// Correlation of the window whose top-left corner is at (x, y).
    ///
    /// `offsets` are the compared pixels as byte offsets into `data` relative
    /// to the window origin, see [`Self::byte_offsets`].
    fn score_window(&self, data: &[u8], origin: usize, offsets: &[usize]) -> Option<f64> {
        let mut dot = 0.0f64;
        let mut sum_i = [0.0f64; 3];
        let mut sum_i2 = [0.0f64; 3];

        for (t, &off) in self.t_prime.iter().zip(offsets) {
            let base = origin + off;
            for c in 0..3 {
                let v = data[base + c] as f64;
                dot += t[c] * v;
                sum_i[c] += v;
                sum_i2[c] += v * v;
            }
        }

        let n = self.points.len() as f64;
        let var_i: f64 = (0..3).map(|c| sum_i2[c] - sum_i[c] * sum_i[c] / n).sum();
        if var_i <= MIN_VARIANCE {
            return None;
        }

        let score = dot / (self.var_t * var_i).sqrt();
        score.is_finite().then(|| score.clamp(-1.0, 1.0))
    }

    fn byte_offsets(&self, image_width: u32) -> Vec<usize> {
        self.points
            .iter()
            .map(|&(x, y)| (y as usize * image_width as usize + x as usize) * 3)
            .collect()
    }

    /// Correlation at a single offset, `None` if the template does not fit
    /// there or the value is undefined.
    pub fn score_at(&self, image: &RgbImage, x: u32, y: u32) -> Option<f32> {
        if self.is_degenerate()
            || x.checked_add(self.width)? > image.width()
            || y.checked_add(self.height)? > image.height()
        {
            return None;
        }
        let offsets = self.byte_offsets(image.width());
        let origin = (y as usize * image.width() as usize + x as usize) * 3;
        self.score_window(image.as_raw(), origin, &offsets)
            .map(|s| s as f32)
    }

    /// Scan every offset inside `region` (the whole image when `None`).
    ///
    /// Returns `None` when the template does not fit in the scanned area or
    /// the correlation is undefined everywhere.
    pub fn scan(&self, image: &RgbImage, region: Option<&SearchRegion>) -> Option<ResponseMap> {
        let area = match region {
            Some(r) => r.clip_to(image.width(), image.height()),
            None => SearchRegion::full_screen(image.width(), image.height()),
        };

        if self.width > area.width || self.height > area.height {
            log::warn!(
                "Template {}x{} larger than search area {}x{}, skipping",
                self.width,
                self.height,
                area.width,
                area.height
            );
            return None;
        }
        if self.is_degenerate() {
            log::warn!(
                "Template has {} compared pixels and no variance under its mask, correlation undefined",
                self.points.len()
            );
            return None;
        }

        let cols = area.width - self.width + 1;
        let rows = area.height - self.height + 1;
        let mut map = ResponseMap::new(cols, rows, area.x, area.y);

        let data = image.as_raw();
        let stride = image.width() as usize * 3;
        let offsets = self.byte_offsets(image.width());
        let report_interval = (rows / 10).max(1);

        for dy in 0..rows {
            let row_origin = (area.y + dy) as usize * stride;
            for dx in 0..cols {
                let origin = row_origin + (area.x + dx) as usize * 3;
                if let Some(score) = self.score_window(data, origin, &offsets) {
                    map.set(dx, dy, score as f32);
                }
            }

            if (dy + 1) % report_interval == 0 {
                log::debug!(
                    "  ⏳ Correlation scanning: {}%",
                    (dy + 1) as u64 * 100 / rows as u64
                );
            }
        }

        Some(map)
    }
}

/// Check that a confidence threshold lies on the correlation scale
pub fn validate_threshold(threshold: f32) -> FinderResult<f32> {
    if (-1.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(FinderError::InvalidThreshold { value: threshold })
    }
}

/// Every offset whose masked correlation is at or above `threshold`.
///
/// Matches are in full-image coordinates, row-major. Neighbouring offsets
/// around one true hit are all reported; no suppression is applied.
pub fn find_matches_masked(
    image: &RgbImage,
    template: &RgbImage,
    mask: &GrayImage,
    threshold: f32,
    region: Option<&SearchRegion>,
) -> FinderResult<Vec<Match>> {
    let threshold = validate_threshold(threshold)?;
    let prepared = MaskedTemplate::new(template, mask)?;
    Ok(prepared
        .scan(image, region)
        .map(|map| map.matches_above(threshold))
        .unwrap_or_default())
}
