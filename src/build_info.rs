//! Compile-time build metadata
//!
//! The build script embeds a monotonically increasing build number and a
//! timestamp; package fields come from Cargo.

use serde::Serialize;

/// Build number as embedded by build.rs ("0" for out-of-tree builds)
pub const BUILD_NUMBER: &str = match option_env!("MACROLOG_BUILD_NUMBER") {
    Some(s) => s,
    None => "0",
};

/// ISO 8601 build timestamp
pub const BUILD_TIMESTAMP: &str = match option_env!("MACROLOG_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build metadata as reported by the status tool
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER.trim().parse().unwrap_or(0),
            build_timestamp: BUILD_TIMESTAMP,
        }
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!(
        "Macrolog v{} (build {}, {})",
        info.version, info.build_number, info.build_timestamp
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_populates_package_fields() {
        let info = BuildInfo::current();
        assert_eq!(info.name, "macrolog");
        assert!(!info.version.is_empty());
    }
}
