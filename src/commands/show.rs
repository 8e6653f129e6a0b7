//! Show command
//!
//! Prints every value derived for the SDK build under test, grouped into
//! `## ` sections, or as a single JSON document.

use super::Target;
use anyhow::{Context, Result};
use sdk_layout::{EnvConfig, TestLayout};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    layout: &'a TestLayout,
    rid_under_test: &'a str,
    sdk_version: Option<String>,
    environment: BTreeMap<&'static str, String>,
}

/// Resolve the layout and print it
pub(crate) fn run(target: &Target, json: bool) -> Result<()> {
    let env = EnvConfig::from_env();
    let layout = target.resolve(&env)?;

    if json {
        let report = Report {
            layout: &layout,
            rid_under_test: layout.rid_under_test(),
            sdk_version: layout.metadata().sdk_version().map(|v| v.to_string()),
            environment: layout
                .projection()
                .vars()
                .map(|(name, value)| (name, value.display().to_string()))
                .collect(),
        };
        let rendered =
            serde_json::to_string_pretty(&report).context("Failed to serialize layout")?;
        println!("{rendered}");
    } else {
        print_text(&layout, &env);
    }

    Ok(())
}

fn display_path(path: Option<&Path>) -> String {
    path.map_or_else(|| "(none)".to_string(), |p| p.display().to_string())
}

fn print_text(layout: &TestLayout, env: &EnvConfig) {
    let meta = layout.metadata();

    println!("## Repository");
    println!();
    println!("Search start     {}", layout.search_start().display());
    println!("Repo root        {}", display_path(layout.repo_root()));
    println!("Artifacts        {}", display_path(layout.artifacts_root()));
    println!("Configuration    {}", layout.configuration());
    println!();

    println!("## SDK Under Test");
    println!();
    println!("dotnet           {}", layout.dotnet_under_test().display());
    println!("SDK folder       {}", layout.sdk_folder_under_test().display());
    println!("Version file     {}", layout.version_file().display());
    println!("Version          {}", meta.version);
    println!("Commit           {}", meta.commit);
    println!("RID              {}", layout.rid_under_test());
    println!();

    println!("## Test Folders");
    println!();
    println!(
        "Global packages  {}",
        display_path(layout.test_global_packages_folder())
    );
    println!("Working folder   {}", display_path(layout.test_working_folder()));
    println!("Test packages    {}", display_path(layout.test_packages()));
    println!();

    println!("## Projected Environment");
    println!();
    for (name, value) in layout.projection().vars() {
        println!("{name:<20} {}", value.display());
    }
    println!();

    println!("## Recognized Variables");
    println!();
    for (name, value) in env.overrides() {
        println!("{name:<20} {}", value.unwrap_or("(unset)"));
    }
}
