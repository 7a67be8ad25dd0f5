//! Application identity constants
//!
//! Central naming and version values; reference these rather than
//! hardcoding strings.

/// The application name
pub const APP_NAME: &str = "LinkCheck";

/// The application type/category
pub const APP_TYPE: &str = "SPI link tester";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
