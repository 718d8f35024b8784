//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Assertion helpers for floating-point measurement values
//! - Export directory fixtures laid out like a server snapshot
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures::ExportBuilder;
//!
//! let export = ExportBuilder::new()
//!     .component("org:a", "A", &[("coverage", &[(30, 50.0), (5, 60.0)])])
//!     .build();
//! ```

pub mod assertions;
pub mod fixtures;

/// Helper to get the sonar-rank binary command
#[allow(dead_code)]
pub fn get_bin() -> assert_cmd::Command {
    assert_cmd::Command::new(env!("CARGO_BIN_EXE_sonar-rank"))
}
