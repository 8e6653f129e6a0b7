//! Command implementations

pub(crate) mod completion;
pub(crate) mod env;
pub(crate) mod show;

use anyhow::{Context, Result};
use sdk_layout::{Configuration, EnvConfig, Resolver, TestLayout};
use std::path::PathBuf;

/// Options shared by commands that resolve a layout
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct Target {
    /// Directory to start the repository search from (defaults to this executable's directory)
    #[arg(long)]
    start: Option<PathBuf>,

    /// Build configuration whose output is exercised
    #[arg(long, value_enum, default_value_t = Configuration::current())]
    configuration: Configuration,
}

impl Target {
    /// Resolve against captured environment options without modifying the process.
    pub(crate) fn resolve(&self, env: &EnvConfig) -> Result<TestLayout> {
        let mut resolver = Resolver::new(env.clone()).configuration(self.configuration);
        if let Some(start) = &self.start {
            resolver = resolver.start_at(start);
        }

        resolver
            .resolve()
            .context("Failed to resolve the SDK layout under test")
    }
}
