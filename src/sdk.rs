//! SDK folder resolution and `.version` metadata parsing.
//!
//! A toolchain install keeps each SDK under `sdk/<version>/`. The build output
//! under test must contain exactly one; anything else means the layout is
//! broken or mixes versions, and no guess is made.

use crate::debug;
use crate::layout::LayoutError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory beneath the toolchain root holding SDK versions.
pub const SDK_DIR: &str = "sdk";

/// Metadata file written into every SDK version folder.
pub const VERSION_FILE: &str = ".version";

/// Build engine entry point inside an SDK folder.
pub const MSBUILD_DLL: &str = "MSBuild.dll";

/// SDK extension directory inside an SDK folder.
pub const SDKS_DIR: &str = "Sdks";

/// Index of the line holding the platform identifier.
const RID_LINE: usize = 2;

/// Resolve the single SDK version folder under `<tool_dir>/sdk`.
///
/// # Errors
///
/// [`LayoutError::AmbiguousSdkLayout`] when the listing is empty or has more
/// than one entry; [`LayoutError::SdkListing`] when it cannot be read.
pub fn resolve_sdk_folder(tool_dir: &Path) -> Result<PathBuf, LayoutError> {
    let sdk_dir = tool_dir.join(SDK_DIR);
    let entries = list_subdirectories(&sdk_dir)?;

    match <[PathBuf; 1]>::try_from(entries) {
        Ok([folder]) => {
            debug!("resolved SDK folder {}", folder.display());
            Ok(folder)
        }
        Err(entries) => {
            let mut names: Vec<String> = entries
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect();
            names.sort();
            Err(LayoutError::AmbiguousSdkLayout {
                sdk_dir,
                entries: names,
            })
        }
    }
}

fn list_subdirectories(dir: &Path) -> Result<Vec<PathBuf>, LayoutError> {
    let listing_error = |source| LayoutError::SdkListing {
        path: dir.to_path_buf(),
        source,
    };

    let mut found = Vec::new();
    for entry in fs::read_dir(dir).map_err(listing_error)? {
        let path = entry.map_err(listing_error)?.path();
        if path.is_dir() {
            found.push(path);
        } else {
            debug!("ignoring non-directory entry {}", path.display());
        }
    }
    Ok(found)
}

/// Parsed contents of an SDK `.version` file.
///
/// The file is line oriented: commit hash, SDK version, platform identifier.
/// Later lines may exist and are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionMetadata {
    pub commit: String,
    pub version: String,
    pub rid: String,
}

impl VersionMetadata {
    /// Read and parse a `.version` file.
    ///
    /// # Errors
    ///
    /// [`LayoutError::MalformedVersionMetadata`] when the file is missing,
    /// unreadable, or not in the expected format.
    pub fn read(path: &Path) -> Result<Self, LayoutError> {
        let contents =
            fs::read_to_string(path).map_err(|e| LayoutError::MalformedVersionMetadata {
                path: path.to_path_buf(),
                reason: format!("unreadable: {e}"),
            })?;
        Self::parse(&contents, path)
    }

    /// Parse `.version` contents; `path` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// [`LayoutError::MalformedVersionMetadata`] when fewer than three lines
    /// are present or the platform identifier is blank.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, LayoutError> {
        let malformed = |reason: String| LayoutError::MalformedVersionMetadata {
            path: path.to_path_buf(),
            reason,
        };

        let lines: Vec<&str> = contents.lines().collect();
        let (Some(commit), Some(version), Some(rid)) =
            (lines.first(), lines.get(1), lines.get(RID_LINE))
        else {
            return Err(malformed(format!(
                "expected at least 3 lines, found {}",
                lines.len()
            )));
        };

        let rid = rid.trim();
        if rid.is_empty() {
            return Err(malformed(format!("line {} is blank", RID_LINE + 1)));
        }

        Ok(Self {
            commit: commit.trim().to_string(),
            version: version.trim().to_string(),
            rid: rid.to_string(),
        })
    }

    /// SDK version as semver, if the version line is well formed.
    #[must_use]
    pub fn sdk_version(&self) -> Option<semver::Version> {
        semver::Version::parse(&self.version).ok()
    }
}
