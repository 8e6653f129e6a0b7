//! Completion command
//!
//! Generate shell completion scripts

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io;

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
/// Users can save this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// sdk-layout completion bash > /usr/local/share/bash-completion/completions/sdk-layout
///
/// # Zsh
/// sdk-layout completion zsh > /usr/local/share/zsh/site-functions/_sdk-layout
///
/// # Fish
/// sdk-layout completion fish > ~/.config/fish/completions/sdk-layout.fish
/// ```
#[allow(
    clippy::unnecessary_wraps,
    reason = "Result type maintained for consistency with command signature pattern"
)]
pub(crate) fn run(shell: Shell) -> Result<()> {
    let mut cmd = crate::Cli::command();

    generate(shell, &mut cmd, "sdk-layout", &mut io::stdout());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_bash() {
        assert!(run(Shell::Bash).is_ok());
    }

    #[test]
    fn completion_zsh() {
        assert!(run(Shell::Zsh).is_ok());
    }

    #[test]
    fn completion_fish() {
        assert!(run(Shell::Fish).is_ok());
    }

    #[test]
    fn completion_powershell() {
        assert!(run(Shell::PowerShell).is_ok());
    }

    #[test]
    fn cli_definition_is_consistent() {
        crate::Cli::command().debug_assert();
    }
}
