//! Environment variables read and written by the layout resolver.
//!
//! Every variable the resolver consults is named here and gathered into
//! [`EnvConfig`] once, so the rest of the crate never reads the environment ad hoc.

use serde::Serialize;
use std::env;
use std::ffi::OsString;

/// Build container identifier; suffixes the artifacts directory name.
pub const ARCADE_CONTAINER: &str = "ARCADE_CONTAINER";

/// Overrides the transient working folder for tests.
pub const CORESDK_TEST_FOLDER: &str = "CORESDK_TEST_FOLDER";

/// Overrides the path of the `dotnet` entry point under test.
pub const DOTNET_UNDER_TEST: &str = "DOTNET_UNDER_TEST";

/// Searched for a bare `dotnet` when no repository root exists.
pub const PATH: &str = "PATH";

/// CLI home directory; tests point it at a scratch folder to isolate user state.
pub const DOTNET_CLI_HOME: &str = "DOTNET_CLI_HOME";

/// Enables `[DEBUG]` diagnostics ("1", "true", "yes").
pub const SDK_LAYOUT_DEBUG: &str = "SDK_LAYOUT_DEBUG";

/// Produced: path of the build engine inside the resolved SDK folder.
pub const MSBUILD_EXE_PATH: &str = "MSBUILD_EXE_PATH";

/// Produced: SDK extension search path inside the resolved SDK folder.
pub const MSBUILD_SDKS_PATH: &str = "MSBuildSDKsPath";

/// Variables consulted during resolution, in lookup order.
pub const RECOGNIZED: [&str; 4] = [ARCADE_CONTAINER, CORESDK_TEST_FOLDER, DOTNET_UNDER_TEST, PATH];

/// Variables set by the environment projection.
pub const PRODUCED: [&str; 2] = [MSBUILD_EXE_PATH, MSBUILD_SDKS_PATH];

// Boolean variables accept "1", "true", "yes" (case-insensitive)
fn is_truthy(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    value == "1" || value == "true" || value == "yes"
}

/// Check if debug output was requested through `SDK_LAYOUT_DEBUG`.
pub fn debug_requested() -> bool {
    env::var(SDK_LAYOUT_DEBUG).ok().is_some_and(|s| is_truthy(&s))
}

/// Recognized environment options, captured once at resolution time.
///
/// Empty values are treated as unset. Tests build this directly (or through
/// [`EnvConfig::from_lookup`]) instead of touching the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvConfig {
    /// `ARCADE_CONTAINER`
    pub arcade_container: Option<String>,
    /// `CORESDK_TEST_FOLDER`
    pub test_folder: Option<String>,
    /// `DOTNET_UNDER_TEST`
    pub dotnet_under_test: Option<String>,
    /// `PATH`, kept raw for `std::env::split_paths`
    #[serde(skip)]
    pub path: Option<OsString>,
}

impl EnvConfig {
    /// Capture the recognized variables from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var_os(name))
    }

    /// Capture the recognized variables through an arbitrary lookup function.
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<OsString>,
    {
        Self {
            arcade_container: non_empty(lookup(ARCADE_CONTAINER)),
            test_folder: non_empty(lookup(CORESDK_TEST_FOLDER)),
            dotnet_under_test: non_empty(lookup(DOTNET_UNDER_TEST)),
            path: lookup(PATH),
        }
    }

    /// Captured values of the overridable variables, paired with their names.
    #[must_use]
    pub fn overrides(&self) -> [(&'static str, Option<&str>); 3] {
        [
            (ARCADE_CONTAINER, self.arcade_container.as_deref()),
            (CORESDK_TEST_FOLDER, self.test_folder.as_deref()),
            (DOTNET_UNDER_TEST, self.dotnet_under_test.as_deref()),
        ]
    }
}

fn non_empty(value: Option<OsString>) -> Option<String> {
    value
        .map(|v| v.to_string_lossy().into_owned())
        .filter(|v| !v.is_empty())
}
