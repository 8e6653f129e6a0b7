//! Shared test utilities for sdk-layout tests
//!
//! Builders for fake repository checkouts and toolchain installs on disk.

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::paths::{self, Configuration};
    use crate::repo::{REPO_MARKER, find_repo_root};
    use crate::sdk::{SDK_DIR, VERSION_FILE};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// A temporary checkout with a built toolchain under its artifacts root.
    #[derive(Debug)]
    pub(crate) struct SdkTree {
        temp: TempDir,
        tool_dir: PathBuf,
    }

    impl SdkTree {
        pub(crate) fn root(&self) -> &Path {
            self.temp.path()
        }

        /// Directory a test binary would run from.
        pub(crate) fn start_dir(&self) -> PathBuf {
            let dir = self.root().join("artifacts/bin/Tests/Debug");
            fs::create_dir_all(&dir).expect("Failed to create start dir");
            dir
        }

        pub(crate) fn version_file(&self, version: &str) -> PathBuf {
            self.tool_dir.join(SDK_DIR).join(version).join(VERSION_FILE)
        }
    }

    /// Write `.version` contents in the layout a real SDK build produces.
    pub(crate) fn version_contents(version: &str, rid: &str) -> String {
        format!("0123456789abcdef0123456789abcdef01234567\n{version}\n{rid}\n{version}\n")
    }

    fn populate_tool_dir(tool_dir: &Path, versions: &[&str], rid: &str) {
        fs::create_dir_all(tool_dir.join(SDK_DIR)).expect("Failed to create sdk dir");
        fs::write(tool_dir.join(paths::tool_file_name()), "").expect("Failed to write tool");
        for version in versions {
            let sdk = tool_dir.join(SDK_DIR).join(version);
            fs::create_dir_all(&sdk).expect("Failed to create SDK folder");
            fs::write(sdk.join(VERSION_FILE), version_contents(version, rid))
                .expect("Failed to write .version");
        }
    }

    /// Create a checkout with `.git` and `<artifacts_name>/bin/redist/<Config>/dotnet`.
    pub(crate) fn sdk_tree(
        artifacts_name: &str,
        configuration: Configuration,
        versions: &[&str],
    ) -> SdkTree {
        let temp = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir(temp.path().join(REPO_MARKER)).expect("Failed to create .git");

        let tool_dir = temp
            .path()
            .join(artifacts_name)
            .join("bin/redist")
            .join(configuration.label())
            .join(paths::TOOL_NAME);
        populate_tool_dir(&tool_dir, versions, "linux-x64");

        SdkTree { temp, tool_dir }
    }

    /// Create a standalone toolchain install (no repository).
    pub(crate) fn tool_install(versions: &[&str], rid: &str) -> TempDir {
        let temp = TempDir::new().expect("Failed to create temp dir");
        populate_tool_dir(temp.path(), versions, rid);
        temp
    }

    /// Create an empty directory with no repository marker at or above it.
    ///
    /// Tries the platform temp dir, then well-known scratch roots. `None` when
    /// every candidate sits inside a checkout.
    pub(crate) fn unmarked_dir() -> Option<TempDir> {
        let mut roots = vec![std::env::temp_dir()];
        if cfg!(unix) {
            roots.extend(["/tmp", "/var/tmp", "/dev/shm"].map(PathBuf::from));
        }

        roots
            .into_iter()
            .filter(|root| root.is_dir())
            .filter_map(|root| TempDir::new_in(root).ok())
            .find(|temp| find_repo_root(temp.path()).is_none())
    }
}
