use crate::error::{FinderError, FinderResult};
use crate::match_image::{MatchConfig, SearchRegion};
use crate::template_matching::MaskMode;
use std::env;
use std::path::PathBuf;

/// Annotated frame written when no output path is given
pub const DEFAULT_OUTPUT: &str = "zipline-matches.png";

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Match,
    Locations,
    ListWindows,
}

#[derive(Debug)]
pub struct Args {
    pub mode: Mode,
    /// Saved screenshot to use instead of capturing a window
    pub image: Option<PathBuf>,
    pub config: MatchConfig,
    pub output: PathBuf,
    pub fit: Option<(u32, u32)>,
    pub best_only: bool,
    pub json: bool,
    pub debug_mode: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            mode: Mode::Match,
            image: None,
            config: MatchConfig::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            fit: None,
            best_only: false,
            json: false,
            debug_mode: false,
        }
    }
}

#[derive(Debug)]
pub enum Command {
    Run(Args),
    Help,
    Version,
}

impl Args {
    /// Parse the process arguments; prints help, version or the error and
    /// returns `None` when there is nothing to run.
    pub fn parse() -> Option<Self> {
        match Self::parse_from(env::args().skip(1)) {
            Ok(Command::Run(args)) => Some(args),
            Ok(Command::Help) => {
                print_help();
                None
            }
            Ok(Command::Version) => {
                println!("Zipline Finder v{}", env!("APP_VERSION_DISPLAY"));
                None
            }
            Err(e) => {
                eprintln!("❌ {e}");
                print_help();
                None
            }
        }
    }

    pub fn parse_from<I, S>(args: I) -> FinderResult<Command>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Args::default();

        for arg in args {
            let arg = arg.as_ref();
            if arg == "--help" || arg == "-h" {
                return Ok(Command::Help);
            } else if arg == "--version" || arg == "-v" {
                return Ok(Command::Version);
            } else if arg == "--debug" {
                parsed.debug_mode = true;
                parsed.config.debug_enabled = true;
            } else if arg == "--best" {
                parsed.best_only = true;
            } else if arg == "--json" {
                parsed.json = true;
            } else if arg == "--no-labels" {
                parsed.config.draw_labels = false;
            } else if arg == "--locations" {
                parsed.mode = Mode::Locations;
            } else if arg == "--list-windows" {
                parsed.mode = Mode::ListWindows;
            } else if let Some(val) = arg.strip_prefix("--image=") {
                parsed.image = Some(PathBuf::from(val));
            } else if let Some(val) = arg.strip_prefix("--window=") {
                parsed.config.window_title = val.to_string();
            } else if let Some(val) = arg.strip_prefix("--template=") {
                parsed.config.template_path = PathBuf::from(val);
            } else if let Some(val) = arg.strip_prefix("--threshold=") {
                parsed.config.confidence_threshold = parse_threshold("threshold", val)?;
            } else if let Some(val) = arg.strip_prefix("--display-threshold=") {
                parsed.config.display_threshold = parse_threshold("display threshold", val)?;
            } else if let Some(val) = arg.strip_prefix("--region=") {
                let region = SearchRegion::parse(val)
                    .filter(SearchRegion::is_valid)
                    .ok_or_else(|| invalid(format!("region '{val}', expected X,Y,W,H")))?;
                parsed.config.search_region = Some(region);
            } else if let Some(val) = arg.strip_prefix("--mask=") {
                parsed.config.mask_mode = MaskMode::parse(val).ok_or_else(|| {
                    invalid(format!("mask '{val}', expected auto, alpha, green or exact"))
                })?;
            } else if let Some(val) = arg.strip_prefix("--output=") {
                parsed.output = PathBuf::from(val);
            } else if let Some(val) = arg.strip_prefix("--fit=") {
                parsed.fit = Some(parse_size(val)?);
            } else if let Some(val) = arg.strip_prefix("--font=") {
                parsed.config.label_font = Some(PathBuf::from(val));
            } else {
                return Err(invalid(format!("unknown argument '{arg}'")));
            }
        }

        Ok(Command::Run(parsed))
    }
}

fn invalid(description: String) -> FinderError {
    FinderError::InvalidArgument { description }
}

fn parse_threshold(name: &str, val: &str) -> FinderResult<f32> {
    let value: f32 = val
        .parse()
        .map_err(|_| invalid(format!("{name} '{val}' is not a number")))?;
    crate::template_matching::validate_threshold(value)
}

fn parse_size(val: &str) -> FinderResult<(u32, u32)> {
    let (w, h) = val
        .split_once(['x', 'X'])
        .ok_or_else(|| invalid(format!("size '{val}', expected WxH")))?;
    match (w.trim().parse::<u32>(), h.trim().parse::<u32>()) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(invalid(format!("size '{val}', expected WxH"))),
    }
}

fn print_help() {
    println!("🔍 Zipline Finder");
    println!();
    println!("USAGE:");
    println!("    zipline-finder [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    (no flags)               Capture the game window and mark ziplines");
    println!("    --image=PATH             Use a saved screenshot instead of capturing");
    println!("    --window=TITLE           Window title substring (default: Endfield)");
    println!("    --template=PATH          Template image (default: resource/Zipline.png)");
    println!("    --threshold=F            Match threshold, -1.0..1.0 (default: 0.7)");
    println!("    --display-threshold=F    Draw threshold, -1.0..1.0 (default: 0.8)");
    println!("    --region=X,Y,W,H         Only search this part of the frame");
    println!("    --mask=MODE              auto, alpha, green or exact (default: auto)");
    println!("    --output=PATH            Annotated image (default: {DEFAULT_OUTPUT})");
    println!("    --fit=WxH                Scale the annotated image to fit WxH");
    println!("    --font=PATH              TrueType font for confidence labels");
    println!("    --no-labels              Draw boxes only");
    println!("    --best                   Print only the best match");
    println!("    --json                   Print a JSON match report");
    println!("    --locations              Print the map location tree");
    println!("    --list-windows           Print capturable window titles");
    println!("    --debug                  Enable debug output");
    println!("    --help, -h               Show this help message");
    println!("    --version, -v            Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    zipline-finder --image=screenshot.png");
    println!("    zipline-finder --window=Endfield --threshold=0.85 --json");
    println!("    zipline-finder --image=shot.png --region=0,0,640,360 --best");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Args {
        match Args::parse_from(args.iter().copied()) {
            Ok(Command::Run(parsed)) => parsed,
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let args = run(&[]);
        assert_eq!(args.mode, Mode::Match);
        assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(args.config.confidence_threshold, 0.7);
        assert_eq!(args.config.display_threshold, 0.8);
    }

    #[test]
    fn test_all_flags() {
        let args = run(&[
            "--image=shot.png",
            "--window=endfield",
            "--template=icons/zip.png",
            "--threshold=0.85",
            "--display-threshold=0.9",
            "--region=10,20,300,200",
            "--mask=exact",
            "--output=out.png",
            "--fit=400x300",
            "--best",
            "--json",
            "--no-labels",
            "--debug",
        ]);
        assert_eq!(args.image, Some(PathBuf::from("shot.png")));
        assert_eq!(args.config.window_title, "endfield");
        assert_eq!(args.config.template_path, PathBuf::from("icons/zip.png"));
        assert_eq!(args.config.confidence_threshold, 0.85);
        assert_eq!(args.config.display_threshold, 0.9);
        assert_eq!(args.config.search_region.as_ref().map(|r| r.width), Some(300));
        assert_eq!(args.config.mask_mode, MaskMode::ExactGreen);
        assert_eq!(args.fit, Some((400, 300)));
        assert!(args.best_only && args.json && args.debug_mode);
        assert!(!args.config.draw_labels);
        assert!(args.config.debug_enabled);
    }

    #[test]
    fn test_help_and_version() {
        assert!(matches!(Args::parse_from(["--help"]), Ok(Command::Help)));
        assert!(matches!(Args::parse_from(["-v"]), Ok(Command::Version)));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Args::parse_from(["--threshold=abc"]),
            Err(FinderError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Args::parse_from(["--threshold=1.5"]),
            Err(FinderError::InvalidThreshold { .. })
        ));
        assert!(Args::parse_from(["--region=1,2,0,4"]).is_err());
        assert!(Args::parse_from(["--mask=purple"]).is_err());
        assert!(Args::parse_from(["--fit=400"]).is_err());
        assert!(Args::parse_from(["--frobnicate"]).is_err());
    }

    #[test]
    fn test_modes() {
        assert_eq!(run(&["--locations"]).mode, Mode::Locations);
        assert_eq!(run(&["--list-windows"]).mode, Mode::ListWindows);
    }
}
