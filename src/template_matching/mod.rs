/// Template matching module for locating icons in screenshots
///
/// This module provides:
/// - Comparison masks from alpha channels or green screen backgrounds
/// - Masked normalized cross-correlation over RGB images
/// - Thresholding into match lists and best-match selection
pub mod mask;
pub mod matcher;
pub mod types;

pub use mask::{GREEN_SCREEN_RANGE, HsvRange, MaskMode, extract_mask};
pub use matcher::{MaskedTemplate, find_matches_masked, validate_threshold};
pub use types::{Match, MatchReport, ResponseMap};

/// Highest-confidence match, `None` for an empty list.
///
/// Ties resolve to whichever equal entry comes last; callers should not rely
/// on the order.
pub fn find_best_match(matches: &[Match]) -> Option<Match> {
    matches.iter().copied().max_by(|a, b| {
        a.confidence
            .partial_cmp(&b.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_match_empty() {
        assert_eq!(find_best_match(&[]), None);
    }

    #[test]
    fn test_best_match_tie_keeps_confidence() {
        let matches = [
            Match::new(0, 0, 0.5),
            Match::new(5, 5, 0.9),
            Match::new(1, 1, 0.9),
        ];
        let best = find_best_match(&matches).unwrap();
        assert_eq!(best.confidence, 0.9);
        assert!(best == matches[1] || best == matches[2]);
    }
}
