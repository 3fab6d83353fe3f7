//! Embeds a per-machine build counter and timestamp into the binary.
//! The counter lives in build_number.txt and bumps whenever src/ changes.

use std::fs;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let counter_file = "build_number.txt";
    let previous: u64 = fs::read_to_string(counter_file)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let build = previous + 1;

    if let Err(e) = fs::write(counter_file, build.to_string()) {
        println!("cargo:warning=could not persist build number: {}", e);
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");

    println!("cargo:rustc-env=MACROLOG_BUILD_NUMBER={}", build);
    println!("cargo:rustc-env=MACROLOG_BUILD_TIMESTAMP={}", timestamp);
}
