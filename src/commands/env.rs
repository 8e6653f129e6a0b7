//! Env command
//!
//! Prints the build-engine variables a test run would project, as shell
//! assignments that can be `eval`ed. The caller's environment is not touched.

use super::Target;
use anyhow::Result;
use sdk_layout::EnvConfig;
use std::path::Path;

/// Assignment syntax for the emitted variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum ShellSyntax {
    /// `export NAME='value'`
    Posix,
    /// `$env:NAME = 'value'`
    Powershell,
}

/// Resolve the layout and print its environment projection
pub(crate) fn run(target: &Target, shell: ShellSyntax) -> Result<()> {
    let layout = target.resolve(&EnvConfig::from_env())?;

    for (name, value) in layout.projection().vars() {
        println!("{}", assignment(shell, name, value));
    }

    Ok(())
}

fn assignment(shell: ShellSyntax, name: &str, value: &Path) -> String {
    let value = value.display().to_string();
    match shell {
        ShellSyntax::Posix => format!("export {name}='{}'", value.replace('\'', r"'\''")),
        ShellSyntax::Powershell => format!("$env:{name} = '{}'", value.replace('\'', "''")),
    }
}
