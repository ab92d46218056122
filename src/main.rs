use std::process::ExitCode;
use zipline_finder::args::{Args, Mode};
use zipline_finder::capture::{self, CaptureProvider, FileCapture};
use zipline_finder::error::{FinderError, FinderResult};
use zipline_finder::locations;
use zipline_finder::session::{DisplayOutcome, FinderSession};

fn main() -> ExitCode {
    let Some(args) = Args::parse() else {
        return ExitCode::SUCCESS;
    };

    init_logging(args.debug_mode);

    let result = match args.mode {
        Mode::Locations => {
            print!("{}", locations::render_tree());
            Ok(())
        }
        Mode::ListWindows => list_windows(),
        Mode::Match => run_match(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(debug_mode: bool) {
    let default_level = if debug_mode { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
}

#[cfg(feature = "window-capture")]
fn list_windows() -> FinderResult<()> {
    let windows = capture::WindowCapture::list_windows()?;
    println!("🪟 {} windows", windows.len());
    for window in windows.iter().filter(|w| !w.title.is_empty()) {
        let state = if window.visible { "" } else { " (minimized)" };
        println!("  {}{}", window.title, state);
    }
    Ok(())
}

#[cfg(not(feature = "window-capture"))]
fn list_windows() -> FinderResult<()> {
    Err(FinderError::CaptureUnsupported)
}

fn run_match(args: Args) -> FinderResult<()> {
    let provider: Box<dyn CaptureProvider> = match &args.image {
        Some(path) => Box::new(FileCapture::new(path)),
        None => capture::default_provider(),
    };
    // stdout carries only the report in JSON mode
    let status = |line: String| {
        if args.json {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    };

    status(format!(
        "🔍 Searching for {} in '{}' (threshold {:.2}, display {:.2})",
        args.config.template_path.display(),
        args.image
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| args.config.window_title.clone()),
        args.config.confidence_threshold,
        args.config.display_threshold
    ));

    let mut session = FinderSession::new(args.config.clone(), provider);
    if let Some((w, h)) = args.fit {
        session = session.with_display_size(w, h);
    }

    let outcome = session.run();

    if let Some(image) = outcome.image() {
        image
            .save(&args.output)
            .map_err(|source| FinderError::ImageSave {
                path: args.output.clone(),
                source,
            })?;
        status(format!("💾 Saved {}", args.output.display()));
    }

    if args.json {
        println!("{}", outcome.to_json()?);
    } else {
        print_summary(&outcome, args.best_only);
    }

    match outcome {
        DisplayOutcome::Placeholder(text) => Err(FinderError::CaptureFailed { description: text }),
        _ => Ok(()),
    }
}

fn print_summary(outcome: &DisplayOutcome, best_only: bool) {
    match outcome {
        DisplayOutcome::Annotated { report, .. } => {
            println!("✅ {}", outcome.status_text());
            if best_only {
                return;
            }
            for m in &report.matches {
                let marker = if m.confidence >= report.display_threshold { "🟩" } else { "  " };
                println!("  {marker} {m}");
            }
        }
        DisplayOutcome::NoMatch { .. } => println!("🤷 {}", outcome.status_text()),
        // The failure itself is reported by the caller
        DisplayOutcome::Placeholder(_) => {}
    }
}
