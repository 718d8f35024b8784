//! Completions command implementation
//!
//! Handles the `sonar-rank completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Generate shell completion scripts
///
/// Outputs the completion script for `cmd` to stdout.
/// Users can redirect this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// sonar-rank completions bash > /etc/bash_completion.d/sonar-rank
///
/// # Zsh
/// sonar-rank completions zsh > ~/.zfunc/_sonar-rank
///
/// # Fish
/// sonar-rank completions fish > ~/.config/fish/completions/sonar-rank.fish
/// ```
pub fn cmd_completions(shell: Shell, cmd: &mut Command) {
    write_completions(shell, cmd, &mut std::io::stdout());
}

/// Write the completion script for `cmd` to `out`
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);
}
