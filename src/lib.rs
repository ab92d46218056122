pub mod args;
pub mod capture;
pub mod display;
pub mod error;
pub mod locations;
pub mod match_image;
pub mod session;
pub mod template_matching;

pub use error::{FinderError, FinderResult};
pub use match_image::{MatchConfig, ZiplineDetector};
pub use session::{DisplayOutcome, FinderSession};
pub use template_matching::{Match, find_best_match, find_matches_masked};
