use image::{Rgb, RgbImage};
use std::path::PathBuf;
use std::process::Command;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("zipline-finder-cli-{}-{}", std::process::id(), name))
}

fn textured(width: u32, height: u32, seed: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let v = (x * 37 + y * 91 + seed) ^ (x * y);
        Rgb([(v % 200) as u8 + 50, (v % 40) as u8, (v * 7 % 251) as u8])
    })
}

fn run(args: &[String]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_zipline-finder"))
        .args(args)
        .env("RUST_LOG", "debug")
        .output()
        .expect("binary runs")
}

#[test]
fn json_mode_writes_only_the_report_to_stdout() {
    let frame = textured(80, 60, 3);
    let template = image::imageops::crop_imm(&frame, 30, 20, 10, 10).to_image();
    let frame_path = temp_path("frame.png");
    let template_path = temp_path("template.png");
    let output_path = temp_path("out.png");
    frame.save(&frame_path).unwrap();
    template.save(&template_path).unwrap();

    let output = run(&[
        format!("--image={}", frame_path.display()),
        format!("--template={}", template_path.display()),
        format!("--output={}", output_path.display()),
        "--threshold=0.95".to_string(),
        "--json".to_string(),
    ]);
    let saved = output_path.is_file();
    for path in [&frame_path, &template_path, &output_path] {
        std::fs::remove_file(path).ok();
    }

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(saved);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(report["best"]["x"], 30);
    assert_eq!(report["best"]["y"], 20);
    assert_eq!(report["template_width"], 10);
    // Status lines still reach the user
    assert!(String::from_utf8_lossy(&output.stderr).contains("Saved"));
}

#[test]
fn json_mode_failure_is_still_json() {
    let missing = temp_path("missing-frame.png");
    let output = run(&[format!("--image={}", missing.display()), "--json".to_string()]);

    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(report["match_count"], 0);
    assert!(report["status"].as_str().is_some_and(|s| s.contains("Capture failed")));
}

#[test]
fn locations_prints_tree() {
    let output = run(&["--locations".to_string()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Valley IV\n"));
    assert!(stdout.contains("  Wuling City"));
}
