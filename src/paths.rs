//! Path derivation for the build output under test.
//!
//! Layout beneath the artifacts root:
//!
//! ```text
//! artifacts[-<container>]/
//!   bin/redist/<Config>/dotnet/dotnet[.exe]
//!   bin/redist/<Config>/dotnet/sdk/<version>/.version
//!   .nuget/packages/
//!   tmp/<Config>/testpackages/
//! ```

use serde::Serialize;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// Base name of the artifacts directory.
pub const ARTIFACTS_DIR: &str = "artifacts";

/// Name of the toolchain entry point, without the platform suffix.
pub const TOOL_NAME: &str = "dotnet";

/// Build configuration whose output is exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
pub enum Configuration {
    Debug,
    Release,
}

impl Configuration {
    /// Configuration matching how this crate itself was compiled.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    /// Directory label used in the artifacts tree.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Name of the artifacts directory, suffixed by the build container when present.
///
/// `None` or an empty identifier yields `"artifacts"`; `"ci7"` yields `"artifacts-ci7"`.
#[must_use]
pub fn artifacts_dir_name(container: Option<&str>) -> String {
    match container {
        Some(id) if !id.is_empty() => format!("{ARTIFACTS_DIR}-{id}"),
        _ => ARTIFACTS_DIR.to_string(),
    }
}

/// Artifacts root for a repository, or `None` when the repository root is unknown.
#[must_use]
pub fn artifacts_root(repo_root: Option<&Path>, container: Option<&str>) -> Option<PathBuf> {
    repo_root.map(|root| root.join(artifacts_dir_name(container)))
}

/// File name of the toolchain entry point on this platform.
#[must_use]
pub fn tool_file_name() -> String {
    format!("{TOOL_NAME}{}", std::env::consts::EXE_SUFFIX)
}

/// Redistributable toolchain entry point inside the artifacts tree.
#[must_use]
pub fn redist_tool_path(artifacts_root: &Path, configuration: Configuration) -> PathBuf {
    artifacts_root
        .join("bin")
        .join("redist")
        .join(configuration.label())
        .join(TOOL_NAME)
        .join(tool_file_name())
}

/// Package cache shared by tests that want isolation from the user's cache.
#[must_use]
pub fn global_packages_folder(artifacts_root: &Path) -> PathBuf {
    artifacts_root.join(".nuget").join("packages")
}

/// Transient state written by tests.
#[must_use]
pub fn test_working_folder(artifacts_root: &Path, configuration: Configuration) -> PathBuf {
    artifacts_root.join("tmp").join(configuration.label())
}

/// Packages produced for tests to consume.
#[must_use]
pub fn test_packages_folder(artifacts_root: &Path, configuration: Configuration) -> PathBuf {
    test_working_folder(artifacts_root, configuration).join("testpackages")
}

/// Search a `PATH`-style list for an executable file named `name`.
///
/// Returns the first match in list order.
#[must_use]
pub fn find_in_search_path(name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let search_path = search_path?;
    std::env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
