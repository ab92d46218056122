//! Search regions for restricting a scan to part of a captured frame

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub name: String,
}

impl SearchRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32, name: String) -> Self {
        Self {
            x,
            y,
            width,
            height,
            name,
        }
    }

    /// Create a region covering a whole frame
    pub fn full_screen(screen_width: u32, screen_height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width: screen_width,
            height: screen_height,
            name: "full_screen".to_string(),
        }
    }

    /// Parse `x,y,width,height`, optionally wrapped in brackets as in
    /// `[300,168,50,50]`.
    pub fn parse(value: &str) -> Option<Self> {
        let inner = value.trim().trim_start_matches('[').trim_end_matches(']');
        let parts: Vec<&str> = inner.split(',').collect();
        if parts.len() != 4 {
            return None;
        }
        let mut coords = [0u32; 4];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = part.trim().parse().ok()?;
        }
        let [x, y, width, height] = coords;
        Some(SearchRegion::new(
            x,
            y,
            width,
            height,
            format!("region_{}_{}_{}_{}", x, y, width, height),
        ))
    }

    /// Clip region to frame boundaries
    pub fn clip_to(&self, screen_width: u32, screen_height: u32) -> SearchRegion {
        let mut region = self.clone();
        region.x = region.x.min(screen_width);
        region.y = region.y.min(screen_height);
        region.width = region.width.min(screen_width - region.x);
        region.height = region.height.min(screen_height - region.y);
        region
    }

    /// Check if this region contains a point
    pub fn contains_point(&self, x: u32, y: u32) -> bool {
        x >= self.x && x - self.x < self.width && y >= self.y && y - self.y < self.height
    }

    /// Get the center point of this region
    pub fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if this region is valid (non-zero dimensions)
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_bracketed() {
        let plain = SearchRegion::parse("10, 20,30,40").unwrap();
        assert_eq!((plain.x, plain.y, plain.width, plain.height), (10, 20, 30, 40));

        let bracketed = SearchRegion::parse("[300,168,50,50]").unwrap();
        assert_eq!(bracketed.x, 300);
        assert_eq!(bracketed.height, 50);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(SearchRegion::parse("1,2,3").is_none());
        assert!(SearchRegion::parse("a,b,c,d").is_none());
        assert!(SearchRegion::parse("-1,0,10,10").is_none());
    }

    #[test]
    fn test_clip_to_frame() {
        let region = SearchRegion::new(1000, 700, 400, 100, "edge".to_string());
        let clipped = region.clip_to(1280, 720);
        assert_eq!((clipped.x, clipped.y), (1000, 700));
        assert_eq!((clipped.width, clipped.height), (280, 20));

        let outside = SearchRegion::new(2000, 10, 50, 50, "out".to_string()).clip_to(1280, 720);
        assert!(!outside.is_valid());
    }

    #[test]
    fn test_contains_and_center() {
        let region = SearchRegion::new(10, 10, 20, 10, "r".to_string());
        assert!(region.contains_point(10, 10));
        assert!(region.contains_point(29, 19));
        assert!(!region.contains_point(30, 19));
        assert!(!region.contains_point(9, 15));
        assert_eq!(region.center(), (20, 15));
    }
}
