//! Drawing match boxes and confidence labels onto a copy of the frame

use super::template::template_dimensions;
use crate::template_matching::Match;
use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::path::Path;

/// Box and label color
pub const MATCH_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
/// Box line width in pixels
pub const BOX_THICKNESS: u32 = 2;
/// Rows between the box's top edge and the label's bottom row
pub const LABEL_OFFSET: i32 = 10;
/// Label glyph height in pixels
pub const LABEL_SCALE: f32 = 16.0;

/// Label font compiled into the binary, used when no other font is configured
const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Where the box size comes from
#[derive(Debug, Clone, Copy)]
pub enum TemplateSize<'a> {
    Explicit { width: u32, height: u32 },
    FromFile(&'a Path),
}

impl TemplateSize<'_> {
    fn resolve(&self) -> Option<(u32, u32)> {
        match self {
            TemplateSize::Explicit { width, height } => Some((*width, *height)),
            TemplateSize::FromFile(path) => match template_dimensions(path) {
                Ok(size) => Some(size),
                Err(e) => {
                    log::warn!("Cannot size match boxes: {e}");
                    None
                }
            },
        }
    }
}

/// Load the label font from `path`, falling back to the bundled font when
/// no path is given or the file is unusable.
pub fn load_label_font(path: Option<&Path>) -> Option<FontArc> {
    if let Some(path) = path {
        match std::fs::read(path).map(FontArc::try_from_vec) {
            Ok(Ok(font)) => {
                log::debug!("Label font loaded from {}", path.display());
                return Some(font);
            }
            Ok(Err(e)) => log::warn!("⚠️ Font {} unusable ({e}), using bundled font", path.display()),
            Err(e) => log::warn!("⚠️ Font {} unreadable ({e}), using bundled font", path.display()),
        }
    }

    match FontArc::try_from_slice(BUNDLED_FONT) {
        Ok(font) => Some(font),
        Err(e) => {
            log::error!("❌ Bundled label font is invalid ({e}), labels will be skipped");
            None
        }
    }
}

/// Draw every match at or above `display_threshold` onto a copy of `base`.
///
/// The input image is never modified. When the box size cannot be resolved
/// the copy is returned without annotations.
pub fn draw_matches(
    base: &RgbImage,
    matches: &[Match],
    display_threshold: f32,
    size: TemplateSize<'_>,
    font: Option<&FontArc>,
) -> RgbImage {
    let mut output = base.clone();

    let Some((width, height)) = size.resolve() else {
        return output;
    };

    let mut drawn = 0usize;
    for m in matches.iter().filter(|m| m.confidence >= display_threshold) {
        // Matches never start outside the searched frame; such input draws nothing
        if m.x >= output.width() || m.y >= output.height() {
            log::warn!("Match {} lies outside the {}x{} frame", m, output.width(), output.height());
            continue;
        }
        draw_box(&mut output, m.x, m.y, width, height);
        if let Some(font) = font {
            draw_label(&mut output, m, font);
        }
        drawn += 1;
    }

    log::debug!(
        "🖍️ Drew {} of {} matches (display threshold {:.2})",
        drawn,
        matches.len(),
        display_threshold
    );
    output
}

/// Box spanning [x, y] to [x + width, y + height], thickened inwards
fn draw_box(image: &mut RgbImage, x: u32, y: u32, width: u32, height: u32) {
    for inset in 0..BOX_THICKNESS {
        let w = (width + 1).saturating_sub(2 * inset);
        let h = (height + 1).saturating_sub(2 * inset);
        if w == 0 || h == 0 {
            break;
        }
        let rect = Rect::at(to_i32(x.saturating_add(inset)), to_i32(y.saturating_add(inset))).of_size(w, h);
        draw_hollow_rect_mut(image, rect, MATCH_COLOR);
    }
}

fn draw_label(image: &mut RgbImage, m: &Match, font: &FontArc) {
    let text = format!("{:.2}", m.confidence);
    let scale = PxScale::from(LABEL_SCALE);
    let Some(bottom) = label_bottom(font, scale, &text) else {
        return;
    };
    // Last drawn row lands LABEL_OFFSET rows above the box
    let top = to_i32(m.y) - LABEL_OFFSET - bottom + 1;
    draw_text_mut(image, MATCH_COLOR, to_i32(m.x), top, scale, font, &text);
}

/// Exclusive bottom of the rendered glyph pixels, relative to the `y` handed
/// to `draw_text_mut`. Glyphs sit on the ascent line, so this is larger than
/// the text height whenever a glyph reaches below the baseline or its
/// outline is rounded outwards.
fn label_bottom(font: &FontArc, scale: PxScale, text: &str) -> Option<i32> {
    let scaled = font.as_scaled(scale);
    text.chars()
        .filter_map(|c| {
            let glyph = scaled
                .glyph_id(c)
                .with_scale_and_position(scale, point(0.0, scaled.ascent()));
            font.outline_glyph(glyph)
        })
        .map(|g| g.px_bounds().max.y.ceil() as i32)
        .max()
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
