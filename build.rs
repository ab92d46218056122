use std::env;
use std::process::Command;
use time::OffsetDateTime;

fn main() {
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let build_year = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|raw| raw.parse::<i64>().ok())
        .and_then(|epoch| OffsetDateTime::from_unix_timestamp(epoch).ok())
        .map(|dt| dt.year())
        .unwrap_or_else(|| OffsetDateTime::now_utc().year());

    println!("cargo:rerun-if-env-changed=CARGO_PKG_VERSION");

    let package_version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());
    let capture = if env::var_os("CARGO_FEATURE_WINDOW_CAPTURE").is_some() {
        "window-capture"
    } else {
        "file-only"
    };

    // Release builds never shell out to git
    let profile = env::var("PROFILE").unwrap_or_default();
    let base_version = if profile == "release" {
        package_version.clone()
    } else {
        println!("cargo:rerun-if-changed=.git/HEAD");
        println!("cargo:rerun-if-changed=.git/refs/tags");

        match exact_git_tag() {
            Some(tag) if tag == format!("v{package_version}") => package_version.clone(),
            _ => format!("{package_version}-dev"),
        }
    };
    let display_version = format!("{base_version} ({capture}, {build_year})");

    println!("cargo:rustc-env=APP_VERSION_DISPLAY={display_version}");
}

fn exact_git_tag() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--exact-match"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}
