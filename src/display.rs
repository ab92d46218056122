// display.rs
// Fitting captured frames into a display area and mapping coordinates back

use image::RgbImage;
use image::imageops::{FilterType, resize};

/// Largest size with the frame's aspect ratio that fits in `max_w` x `max_h`.
/// Never upscales and never returns a zero side.
pub fn fit_size(image_w: u32, image_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if image_w == 0 || image_h == 0 || max_w == 0 || max_h == 0 {
        return (image_w.max(1).min(max_w.max(1)), image_h.max(1).min(max_h.max(1)));
    }
    if image_w <= max_w && image_h <= max_h {
        return (image_w, image_h);
    }

    let image_aspect = image_w as f64 / image_h as f64;
    let container_aspect = max_w as f64 / max_h as f64;
    let (w, h) = if image_aspect > container_aspect {
        (max_w as f64, max_w as f64 / image_aspect)
    } else {
        (max_h as f64 * image_aspect, max_h as f64)
    };
    ((w.round() as u32).clamp(1, max_w), (h.round() as u32).clamp(1, max_h))
}

/// Scaled copy of `image` fitting the display area, aspect ratio preserved
pub fn fit_to_display(image: &RgbImage, max_w: u32, max_h: u32) -> RgbImage {
    let (w, h) = fit_size(image.width(), image.height(), max_w, max_h);
    if (w, h) == image.dimensions() {
        return image.clone();
    }
    resize(image, w, h, FilterType::Triangle)
}

/// Map a point in the displayed (scaled) frame to captured-frame pixels
pub fn display_to_image(
    point: (u32, u32),
    display_size: (u32, u32),
    image_size: (u32, u32),
) -> (u32, u32) {
    map_point(point, display_size, image_size)
}

/// Map a captured-frame pixel to the displayed (scaled) frame
pub fn image_to_display(
    point: (u32, u32),
    image_size: (u32, u32),
    display_size: (u32, u32),
) -> (u32, u32) {
    map_point(point, image_size, display_size)
}

fn map_point(point: (u32, u32), from: (u32, u32), to: (u32, u32)) -> (u32, u32) {
    let from_w = from.0.max(1) as f64;
    let from_h = from.1.max(1) as f64;
    let x = (point.0.min(from.0.saturating_sub(1)) as f64 + 0.5) * to.0 as f64 / from_w;
    let y = (point.1.min(from.1.saturating_sub(1)) as f64 + 0.5) * to.1 as f64 / from_h;
    (
        (x as u32).min(to.0.saturating_sub(1)),
        (y as u32).min(to.1.saturating_sub(1)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_fit_wide_frame() {
        assert_eq!(fit_size(1280, 720, 400, 300), (400, 225));
    }

    #[test]
    fn test_fit_tall_frame() {
        assert_eq!(fit_size(1080, 2280, 400, 600), (284, 600));
    }

    #[test]
    fn test_no_upscale() {
        assert_eq!(fit_size(320, 200, 1000, 1000), (320, 200));
    }

    #[test]
    fn test_degenerate_sizes() {
        let (w, h) = fit_size(5000, 1, 100, 100);
        assert_eq!((w, h), (100, 1));
        assert_eq!(fit_size(0, 0, 10, 10), (1, 1));
    }

    #[test]
    fn test_fit_to_display_dimensions() {
        let image = RgbImage::from_pixel(200, 100, Rgb([9, 9, 9]));
        let shown = fit_to_display(&image, 50, 50);
        assert_eq!(shown.dimensions(), (50, 25));
        assert_eq!(image.dimensions(), (200, 100));
    }

    #[test]
    fn test_coordinate_round_trip_within_a_pixel() {
        let image_size = (1280, 720);
        let display_size = fit_size(1280, 720, 400, 300);
        for &(x, y) in &[(0, 0), (640, 360), (1279, 719), (333, 101)] {
            let shown = image_to_display((x, y), image_size, display_size);
            let back = display_to_image(shown, display_size, image_size);
            let scale = 1280.0 / 400.0;
            assert!((back.0 as f64 - x as f64).abs() <= scale, "x {x} -> {back:?}");
            assert!((back.1 as f64 - y as f64).abs() <= scale, "y {y} -> {back:?}");
        }
    }

    #[test]
    fn test_mapping_clamps_to_bounds() {
        // Out of range input lands on the last display pixel's center
        assert_eq!(display_to_image((999, 999), (400, 225), (1280, 720)), (1278, 718));
        assert_eq!(image_to_display((5000, 5000), (1280, 720), (400, 225)), (399, 224));
    }
}
