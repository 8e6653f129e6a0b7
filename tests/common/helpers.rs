//! Shared test helpers and utilities

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Get the path to the sdk-layout binary built for this test run
#[allow(dead_code)]
pub(crate) fn get_sdk_layout_binary() -> String {
    env!("CARGO_BIN_EXE_sdk-layout").to_string()
}

/// Name of the toolchain entry point on this platform
#[allow(dead_code)]
pub(crate) fn tool_file_name() -> String {
    format!("dotnet{}", std::env::consts::EXE_SUFFIX)
}

/// Populate `tool_dir` with a `dotnet` entry point and one SDK folder per version
///
/// Each SDK folder gets a `.version` file naming `rid` on its third line.
#[allow(dead_code)]
pub(crate) fn create_tool_dir(tool_dir: &Path, versions: &[&str], rid: &str) {
    fs::create_dir_all(tool_dir.join("sdk")).expect("Failed to create sdk dir");
    fs::write(tool_dir.join(tool_file_name()), "").expect("Failed to write dotnet");
    for version in versions {
        let sdk = tool_dir.join("sdk").join(version);
        fs::create_dir_all(&sdk).expect("Failed to create SDK folder");
        fs::write(
            sdk.join(".version"),
            format!("4b0c1a2d3e4f5a6b7c8d9e0f1a2b3c4d5e6f7a8b\n{version}\n{rid}\n{version}\n"),
        )
        .expect("Failed to write .version");
    }
}

/// Create a checkout at `temp` with `.git` and a Debug redist build under `artifacts_name`
///
/// # Returns
/// The toolchain directory (`<artifacts>/bin/redist/Debug/dotnet`)
#[allow(dead_code)]
pub(crate) fn create_repo_with_sdk(
    temp: &TempDir,
    artifacts_name: &str,
    versions: &[&str],
) -> PathBuf {
    fs::create_dir(temp.path().join(".git")).expect("Failed to create .git");
    let tool_dir = temp
        .path()
        .join(artifacts_name)
        .join("bin/redist/Debug/dotnet");
    create_tool_dir(&tool_dir, versions, "linux-x64");
    tool_dir
}

/// Create a temp directory with no `.git` at or above it
///
/// Tries the platform temp dir first, then well-known scratch roots. Returns
/// `None` when every candidate sits inside a checkout.
#[allow(dead_code)]
pub(crate) fn unmarked_temp_dir() -> Option<TempDir> {
    let mut roots = vec![std::env::temp_dir()];
    if cfg!(unix) {
        roots.extend(["/tmp", "/var/tmp", "/dev/shm"].map(PathBuf::from));
    }

    roots
        .into_iter()
        .filter(|root| root.is_dir())
        .filter_map(|root| TempDir::new_in(root).ok())
        .find(|temp| sdk_layout::find_repo_root(temp.path()).is_none())
}

/// Build a command for `sdk-layout` with the recognized variables cleared
#[allow(dead_code)]
pub(crate) fn sdk_layout_command() -> Command {
    let mut cmd = Command::new(get_sdk_layout_binary());
    for name in [
        "ARCADE_CONTAINER",
        "CORESDK_TEST_FOLDER",
        "DOTNET_UNDER_TEST",
        "SDK_LAYOUT_DEBUG",
    ] {
        cmd.env_remove(name);
    }
    cmd
}

/// Run `sdk-layout show --json` from `start` and parse the output
#[allow(dead_code)]
pub(crate) fn show_json(cmd: &mut Command, start: &Path) -> serde_json::Value {
    let output = cmd
        .args(["show", "--json", "--configuration", "debug", "--start"])
        .arg(start)
        .output()
        .expect("Failed to execute sdk-layout show --json");

    assert!(
        output.status.success(),
        "sdk-layout show --json failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("show --json should print valid JSON")
}
