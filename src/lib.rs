//! Locates a repository's freshly built SDK for integration tests.
//!
//! Tests call [`initialize`] once; it walks up to the repository root, finds
//! the single SDK folder in the build output, reads its `.version` metadata and
//! points `MSBUILD_EXE_PATH`/`MSBuildSDKsPath` at it for every child process.

pub mod debug;
pub mod env_vars;
pub mod layout;
pub mod paths;
pub mod repo;
pub mod sdk;
mod test_utils;

// Re-export common types for convenience
pub use debug::{init_debug, is_debug_enabled};
pub use env_vars::EnvConfig;
pub use layout::{EnvironmentProjection, LayoutError, Resolver, TestLayout, initialize, layout};
pub use paths::{Configuration, artifacts_dir_name};
pub use repo::find_repo_root;
pub use sdk::{VersionMetadata, resolve_sdk_folder};
