//! Comparison mask extraction for chroma-keyed and transparent templates
//!
//! A template is compared only where its mask says `Compare`. The mask comes
//! from the alpha channel when the template has one, otherwise from a green
//! screen band tested in HSV space.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use serde::Serialize;

/// Mask value for pixels that take part in the correlation
pub const COMPARE: u8 = 255;
/// Mask value for background pixels
pub const IGNORE: u8 = 0;

/// Inclusive HSV band on the 8-bit convention (H in 0..180, S and V in 0..=255)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| hsv[i] >= self.lower[i] && hsv[i] <= self.upper[i])
    }
}

/// Green screen band used to key out template backgrounds
pub const GREEN_SCREEN_RANGE: HsvRange = HsvRange::new([40, 50, 50], [80, 255, 255]);

/// Exact chroma key color of the earliest zipline templates
pub const PURE_GREEN: Rgb<u8> = Rgb([0, 255, 0]);

/// How the mask is derived from a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MaskMode {
    /// Alpha channel when present, green screen band otherwise
    #[default]
    Auto,
    /// Alpha channel only; templates without alpha compare every pixel
    Alpha,
    /// HSV green band, even when an alpha channel exists
    GreenScreen,
    /// Only pixels exactly equal to pure green are ignored
    ExactGreen,
}

impl MaskMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "auto" => Some(MaskMode::Auto),
            "alpha" => Some(MaskMode::Alpha),
            "green" | "hsv" => Some(MaskMode::GreenScreen),
            "exact" => Some(MaskMode::ExactGreen),
            _ => None,
        }
    }
}

/// Convert an RGB pixel to 8-bit HSV (H halved into 0..180).
pub fn rgb_to_hsv(pixel: Rgb<u8>) -> [u8; 3] {
    let [r, g, b] = pixel.0.map(f32::from);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 { delta * 255.0 / max } else { 0.0 };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    // 360 degrees rounds back onto 0 on the halved scale
    let h = ((h / 2.0).round() as u32 % 180) as u8;
    [h, s.round() as u8, max as u8]
}

/// Mask from a template's alpha channel: transparent pixels are ignored.
pub fn alpha_mask(template: &DynamicImage) -> GrayImage {
    let rgba = template.to_rgba8();
    GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        if rgba.get_pixel(x, y)[3] == 0 {
            Luma([IGNORE])
        } else {
            Luma([COMPARE])
        }
    })
}

/// Mask ignoring every pixel that falls inside `range` in HSV space.
pub fn green_screen_mask(template: &RgbImage, range: &HsvRange) -> GrayImage {
    GrayImage::from_fn(template.width(), template.height(), |x, y| {
        if range.contains(rgb_to_hsv(*template.get_pixel(x, y))) {
            Luma([IGNORE])
        } else {
            Luma([COMPARE])
        }
    })
}

/// Mask ignoring only pixels exactly equal to `key`.
pub fn exact_key_mask(template: &RgbImage, key: Rgb<u8>) -> GrayImage {
    GrayImage::from_fn(template.width(), template.height(), |x, y| {
        if *template.get_pixel(x, y) == key {
            Luma([IGNORE])
        } else {
            Luma([COMPARE])
        }
    })
}

/// Derive the comparison mask for a decoded template.
///
/// The result always has the template's width and height and only contains
/// [`COMPARE`] and [`IGNORE`].
pub fn extract_mask(template: &DynamicImage, mode: MaskMode, range: &HsvRange) -> GrayImage {
    let has_alpha = template.color().has_alpha();
    match mode {
        MaskMode::Auto if has_alpha => alpha_mask(template),
        MaskMode::Auto | MaskMode::GreenScreen => green_screen_mask(&template.to_rgb8(), range),
        MaskMode::Alpha => alpha_mask(template),
        MaskMode::ExactGreen => exact_key_mask(&template.to_rgb8(), PURE_GREEN),
    }
}

/// Number of pixels that take part in the correlation
pub fn compare_count(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p[0] != IGNORE).count()
}
