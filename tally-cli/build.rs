use std::process::Command;

// Embeds the short git revision for `tally --version`. Packaged builds
// without a checkout can pass TALLY_BUILD_SHA through the environment.
fn main() {
    println!("cargo:rerun-if-env-changed=TALLY_BUILD_SHA");

    let sha = std::env::var("TALLY_BUILD_SHA")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(git_short_sha)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=TALLY_BUILD_SHA={sha}");
}

fn git_short_sha() -> Option<String> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let out = Command::new("git")
        .args(["-C", &format!("{manifest_dir}/.."), "rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!sha.is_empty()).then_some(sha)
}
