//! Template loading and mask derivation

use crate::error::{FinderError, FinderResult};
use crate::template_matching::{HsvRange, MaskMode, MaskedTemplate, extract_mask, mask};
use image::{DynamicImage, GrayImage, RgbImage};
use std::path::{Path, PathBuf};

/// A template decoded from disk together with its comparison mask.
///
/// Loaded fresh for every matching call; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Template {
    pub path: PathBuf,
    pub name: String,
    pub image: RgbImage,
    pub mask: GrayImage,
    pub has_alpha: bool,
}

impl Template {
    pub fn load(path: &Path, mode: MaskMode, range: &HsvRange) -> FinderResult<Self> {
        let decoded = load_template_image(path)?;
        Ok(Self::from_image(path, &decoded, mode, range))
    }

    /// Build from an already decoded image
    pub fn from_image(path: &Path, decoded: &DynamicImage, mode: MaskMode, range: &HsvRange) -> Self {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        let mask = extract_mask(decoded, mode, range);
        let image = decoded.to_rgb8();
        log::debug!(
            "📐 Template '{}' {}x{} alpha={} compared pixels={}",
            name,
            image.width(),
            image.height(),
            decoded.color().has_alpha(),
            mask::compare_count(&mask)
        );

        Self {
            path: path.to_path_buf(),
            name,
            image,
            mask,
            has_alpha: decoded.color().has_alpha(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Fraction of template pixels that take part in the correlation
    pub fn compare_ratio(&self) -> f32 {
        let total = (self.width() * self.height()) as f32;
        if total == 0.0 {
            return 0.0;
        }
        mask::compare_count(&self.mask) as f32 / total
    }

    /// Prepare the template for scanning
    pub fn prepare(&self) -> FinderResult<MaskedTemplate> {
        MaskedTemplate::new(&self.image, &self.mask)
    }
}

/// Decode a template, distinguishing a missing file from a corrupt one.
pub fn load_template_image(path: &Path) -> FinderResult<DynamicImage> {
    if !path.is_file() {
        return Err(FinderError::TemplateNotFound {
            path: path.to_path_buf(),
        });
    }
    image::open(path).map_err(|source| FinderError::TemplateDecode {
        path: path.to_path_buf(),
        source,
    })
}

/// Width and height of a template file, read from its header
pub fn template_dimensions(path: &Path) -> FinderResult<(u32, u32)> {
    if !path.is_file() {
        return Err(FinderError::TemplateNotFound {
            path: path.to_path_buf(),
        });
    }
    image::image_dimensions(path).map_err(|source| FinderError::TemplateDecode {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template_matching::GREEN_SCREEN_RANGE;
    use image::{Rgb, Rgba, RgbaImage};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("zipline-finder-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_template_is_not_found() {
        let path = temp_path("does-not-exist.png");
        let err = Template::load(&path, MaskMode::Auto, &GREEN_SCREEN_RANGE).unwrap_err();
        assert!(matches!(err, FinderError::TemplateNotFound { .. }));
        assert!(matches!(
            template_dimensions(&path),
            Err(FinderError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn test_corrupt_template_is_decode_error() {
        let path = temp_path("corrupt.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = Template::load(&path, MaskMode::Auto, &GREEN_SCREEN_RANGE).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, FinderError::TemplateDecode { .. }));
    }

    #[test]
    fn test_load_png_with_alpha() {
        let path = temp_path("alpha.png");
        let mut rgba = RgbaImage::from_pixel(6, 4, Rgba([200, 40, 40, 255]));
        rgba.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        rgba.save(&path).unwrap();

        let template = Template::load(&path, MaskMode::Auto, &GREEN_SCREEN_RANGE).unwrap();
        assert_eq!(template_dimensions(&path).unwrap(), (6, 4));
        std::fs::remove_file(&path).ok();

        assert!(template.has_alpha);
        assert_eq!(template.dimensions(), (6, 4));
        assert_eq!(template.mask.dimensions(), (6, 4));
        assert_eq!(template.mask.get_pixel(0, 0)[0], mask::IGNORE);
        assert!((template.compare_ratio() - 23.0 / 24.0).abs() < 1e-6);
    }

    #[test]
    fn test_green_screen_template_from_image() {
        let mut rgb = RgbImage::from_pixel(4, 4, Rgb([0, 255, 0]));
        rgb.put_pixel(1, 1, Rgb([250, 250, 250]));
        rgb.put_pixel(2, 2, Rgb([10, 10, 10]));
        let decoded = DynamicImage::ImageRgb8(rgb);

        let template = Template::from_image(Path::new("Zipline.png"), &decoded, MaskMode::Auto, &GREEN_SCREEN_RANGE);
        assert_eq!(template.name, "Zipline");
        assert!(!template.has_alpha);
        assert_eq!(mask::compare_count(&template.mask), 2);
        assert!(template.prepare().is_ok());
    }
}
