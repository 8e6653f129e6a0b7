//! Resolution of the full test layout and its environment projection.
//!
//! Resolution is linear: repository root, artifacts root, toolchain entry
//! point, SDK folder, `.version` metadata. The process-wide result is computed
//! once by [`initialize`] and then only read.

use crate::debug;
use crate::env_vars::{self, EnvConfig};
use crate::paths::{self, Configuration};
use crate::repo;
use crate::sdk::{self, VersionMetadata};
use serde::Serialize;
use std::env;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("No repository root (no .git) found above {}", .start.display())]
    UnresolvableRepositoryRoot { start: PathBuf },

    #[error(
        "Expected exactly one SDK folder in {}, found {}",
        .sdk_dir.display(),
        describe_entries(.entries)
    )]
    AmbiguousSdkLayout {
        sdk_dir: PathBuf,
        entries: Vec<String>,
    },

    #[error("Failed to list SDK folders in {}: {source}", .path.display())]
    SdkListing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed version metadata in {}: {reason}", .path.display())]
    MalformedVersionMetadata { path: PathBuf, reason: String },

    #[error("{name} is not on PATH and no repository root was found to locate it")]
    ToolNotFound { name: String },
}

fn describe_entries(entries: &[String]) -> String {
    if entries.is_empty() {
        "none".to_string()
    } else {
        format!("{} ({})", entries.len(), entries.join(", "))
    }
}

/// Every location and identifier derived for a test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestLayout {
    configuration: Configuration,
    search_start: PathBuf,
    repo_root: Option<PathBuf>,
    artifacts_root: Option<PathBuf>,
    dotnet_under_test: PathBuf,
    sdk_folder_under_test: PathBuf,
    version_file: PathBuf,
    metadata: VersionMetadata,
    test_global_packages_folder: Option<PathBuf>,
    test_working_folder: Option<PathBuf>,
    test_packages: Option<PathBuf>,
}

impl TestLayout {
    pub fn configuration(&self) -> Configuration {
        self.configuration
    }

    /// Directory the repository search started from.
    pub fn search_start(&self) -> &Path {
        &self.search_start
    }

    /// Nearest ancestor holding `.git`, if any.
    pub fn repo_root(&self) -> Option<&Path> {
        self.repo_root.as_deref()
    }

    pub fn artifacts_root(&self) -> Option<&Path> {
        self.artifacts_root.as_deref()
    }

    /// Artifacts root for callers that cannot run without one.
    pub fn require_artifacts_root(&self) -> Result<&Path, LayoutError> {
        self.artifacts_root
            .as_deref()
            .ok_or_else(|| LayoutError::UnresolvableRepositoryRoot {
                start: self.search_start.clone(),
            })
    }

    /// Toolchain entry point to invoke; a bare name when it came from `PATH`.
    pub fn dotnet_under_test(&self) -> &Path {
        &self.dotnet_under_test
    }

    pub fn sdk_folder_under_test(&self) -> &Path {
        &self.sdk_folder_under_test
    }

    pub fn version_file(&self) -> &Path {
        &self.version_file
    }

    pub fn metadata(&self) -> &VersionMetadata {
        &self.metadata
    }

    /// Platform identifier of the SDK under test, e.g. `linux-x64`.
    pub fn rid_under_test(&self) -> &str {
        &self.metadata.rid
    }

    pub fn test_global_packages_folder(&self) -> Option<&Path> {
        self.test_global_packages_folder.as_deref()
    }

    pub fn test_working_folder(&self) -> Option<&Path> {
        self.test_working_folder.as_deref()
    }

    pub fn test_packages(&self) -> Option<&Path> {
        self.test_packages.as_deref()
    }

    pub fn msbuild_exe_path(&self) -> PathBuf {
        self.sdk_folder_under_test.join(sdk::MSBUILD_DLL)
    }

    pub fn msbuild_sdks_path(&self) -> PathBuf {
        self.sdk_folder_under_test.join(sdk::SDKS_DIR)
    }

    /// Extensions path for build-engine runs hosted in the test process.
    pub fn msbuild_extensions_path(&self) -> &Path {
        &self.sdk_folder_under_test
    }

    /// Variables redirecting build-engine subprocesses to this layout.
    pub fn projection(&self) -> EnvironmentProjection {
        EnvironmentProjection {
            vars: vec![
                (env_vars::MSBUILD_EXE_PATH, self.msbuild_exe_path()),
                (env_vars::MSBUILD_SDKS_PATH, self.msbuild_sdks_path()),
            ],
        }
    }
}

/// Resolves a [`TestLayout`] from a start directory and captured environment.
#[derive(Debug, Clone)]
pub struct Resolver {
    start: PathBuf,
    env: EnvConfig,
    configuration: Configuration,
}

impl Resolver {
    /// Resolver starting at the test binary's directory.
    pub fn new(env: EnvConfig) -> Self {
        Self {
            start: repo::base_directory(),
            env,
            configuration: Configuration::current(),
        }
    }

    /// Resolver over the current process environment.
    pub fn from_env() -> Self {
        Self::new(EnvConfig::from_env())
    }

    /// Start the repository search at `dir` instead.
    #[must_use]
    pub fn start_at(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start = dir.into();
        self
    }

    #[must_use]
    pub fn configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Run one full resolution pass.
    ///
    /// Reads the file system only; the environment is left untouched.
    pub fn resolve(&self) -> Result<TestLayout, LayoutError> {
        let start = repo::normalize_path(&self.start);

        let repo_root = repo::find_repo_root(&start);
        match &repo_root {
            Some(root) => debug!("repository root: {}", root.display()),
            None => debug!("no repository root above {}", start.display()),
        }

        let artifacts_root =
            paths::artifacts_root(repo_root.as_deref(), self.env.arcade_container.as_deref());

        let dotnet_under_test = self.dotnet_under_test(artifacts_root.as_deref());
        debug!("dotnet under test: {}", dotnet_under_test.display());

        let tool_dir = self.tool_dir(&dotnet_under_test)?;
        let sdk_folder_under_test = sdk::resolve_sdk_folder(&tool_dir)?;

        let version_file = sdk_folder_under_test.join(sdk::VERSION_FILE);
        let metadata = VersionMetadata::read(&version_file)?;
        debug!("rid under test: {}", metadata.rid);

        if sdk_folder_under_test.file_name() != Some(OsStr::new(&metadata.version)) {
            debug!(
                "SDK folder {} does not match .version entry {}",
                sdk_folder_under_test.display(),
                metadata.version
            );
        }

        let config = self.configuration;
        let test_working_folder = self
            .env
            .test_folder
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| {
                artifacts_root
                    .as_deref()
                    .map(|a| paths::test_working_folder(a, config))
            });

        Ok(TestLayout {
            configuration: config,
            test_global_packages_folder: artifacts_root
                .as_deref()
                .map(paths::global_packages_folder),
            test_packages: artifacts_root
                .as_deref()
                .map(|a| paths::test_packages_folder(a, config)),
            test_working_folder,
            search_start: start,
            repo_root,
            artifacts_root,
            dotnet_under_test,
            sdk_folder_under_test,
            version_file,
            metadata,
        })
    }

    fn dotnet_under_test(&self, artifacts_root: Option<&Path>) -> PathBuf {
        if let Some(path) = &self.env.dotnet_under_test {
            return PathBuf::from(path);
        }

        artifacts_root.map_or_else(
            || PathBuf::from(paths::tool_file_name()),
            |artifacts| paths::redist_tool_path(artifacts, self.configuration),
        )
    }

    // A bare command name is looked up on PATH so the degraded mode finds
    // an SDK folder next to whatever would actually be executed.
    fn tool_dir(&self, dotnet: &Path) -> Result<PathBuf, LayoutError> {
        if let Some(parent) = dotnet.parent()
            && !parent.as_os_str().is_empty()
        {
            return Ok(parent.to_path_buf());
        }

        let name = dotnet.to_string_lossy().into_owned();
        paths::find_in_search_path(&name, self.env.path.as_deref())
            .and_then(|found| found.parent().map(Path::to_path_buf))
            .inspect(|dir| debug!("found {name} on PATH in {}", dir.display()))
            .ok_or(LayoutError::ToolNotFound { name })
    }
}

/// Environment variables set after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentProjection {
    vars: Vec<(&'static str, PathBuf)>,
}

impl EnvironmentProjection {
    pub fn vars(&self) -> impl Iterator<Item = (&'static str, &Path)> + '_ {
        self.vars.iter().map(|(name, value)| (*name, value.as_path()))
    }

    /// Apply to a single child process without touching this process.
    pub fn apply_to_command<'a>(&self, command: &'a mut Command) -> &'a mut Command {
        command.envs(self.vars())
    }

    /// Apply to this process so every child inherits the variables.
    ///
    /// Must run while no other thread reads or writes the environment, which
    /// for a test suite means before its test threads start or spawn processes.
    #[allow(unsafe_code, reason = "process-wide projection is the point")]
    pub fn apply_to_process(&self) {
        for (name, value) in self.vars() {
            debug!("setting {name}={}", value.display());
            // SAFETY: callers guarantee no other thread touches the process
            // environment while this runs.
            unsafe { env::set_var(name, value) };
        }
    }
}

static LAYOUT: OnceLock<Result<TestLayout, LayoutError>> = OnceLock::new();

/// Resolve the layout for this process and project its environment.
///
/// The first call does the work; every later call returns the same result.
/// A successful first call sets [`env_vars::PRODUCED`] on the process, so it
/// must happen before any other thread reads the environment or spawns a
/// process (for a test suite, from its setup before tests run in parallel).
pub fn initialize() -> Result<&'static TestLayout, &'static LayoutError> {
    LAYOUT
        .get_or_init(|| {
            let layout = Resolver::from_env().resolve()?;
            layout.projection().apply_to_process();
            Ok(layout)
        })
        .as_ref()
}

/// Layout resolved by a successful [`initialize`], if it has run.
pub fn layout() -> Option<&'static TestLayout> {
    LAYOUT.get().and_then(|result| result.as_ref().ok())
}
