// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # fla-observability
//!
//! Logging infrastructure for the landscape analysis crates.
//!
//! The library crates only emit `tracing` events; this crate owns the
//! subscriber. Binaries pick per-crate debug output with `--debug-<crate>`
//! flags or `FLA_DEBUG`, and choose between console-only logging and
//! console plus per-run JSON log files.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "fla",
    "fla-genotype",
    "fla-landscape",
    "fla-config",
    "fla-observability",
    "landscape-report",
];

/// Crates that emit `tracing` events and get their own log file.
/// The umbrella `fla` crate has none; `fla.log` is the combined file.
pub const LOGGING_CRATES: &[&str] = &["fla-landscape", "landscape-report"];

/// `tracing` target for a crate name (`fla-landscape` -> `fla_landscape`)
pub fn crate_target(crate_name: &str) -> String {
    crate_name.replace('-', "_")
}
