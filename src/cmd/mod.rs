//! Command handlers for sonar-rank CLI
//!
//! This module contains all command implementations, organized by functionality.
//! Each submodule handles a specific CLI command.

pub mod completions;
pub mod init;
pub mod rank;

// Re-export command functions for convenient access
pub use completions::cmd_completions;
pub use init::cmd_init;
pub use rank::{cmd_rank, run_rank, RankArgs};
