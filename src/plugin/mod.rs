//! Plugin directories and the per-plugin build steps
//!
//! A plugin is a subdirectory of the working directory whose name is also the
//! stem of its main source file (`foo/foo.sp`).
//!
//! - **version**: version lookup from `version.txt` or the main source
//! - **bundle**: copy scripting sources into a release bundle
//! - **binary**: compile with spcomp or fall back to an existing `.smx`
//! - **archive**: zip a bundle and remove it

pub mod archive;
pub mod binary;
pub mod bundle;
pub mod version;

use crate::core::context::ReleaseContext;
use crate::core::error::{ReleaseResult, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};

/// SourcePawn source extension
pub const SOURCE_EXTENSION: &str = "sp";

/// Sidecar file overriding the in-source version
pub const VERSION_FILE: &str = "version.txt";

/// Release notes attached to a published release
pub const CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Plugin-local include directory
pub const INCLUDE_DIR: &str = "include";

/// One plugin directory found by [`scan`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginEntry {
  /// Directory name, also the main source file stem
  pub name: String,
  /// Absolute path to the plugin directory
  pub path: PathBuf,
}

impl PluginEntry {
  pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
    Self {
      name: name.into(),
      path: path.into(),
    }
  }

  /// `<dir>/<name>.sp`
  pub fn main_source(&self) -> PathBuf {
    self.path.join(format!("{}.{}", self.name, SOURCE_EXTENSION))
  }

  /// `<dir>/version.txt`
  pub fn version_file(&self) -> PathBuf {
    self.path.join(VERSION_FILE)
  }

  /// `<dir>/include`
  pub fn include_dir(&self) -> PathBuf {
    self.path.join(INCLUDE_DIR)
  }

  /// `<dir>/CHANGELOG.md` when it exists
  pub fn changelog(&self) -> Option<PathBuf> {
    let path = self.path.join(CHANGELOG_FILE);
    path.is_file().then_some(path)
  }
}

/// List eligible plugin directories under the working directory, sorted by name
///
/// Skips files, hidden directories, configured exclusions, and the release
/// output directory itself.
pub fn scan(ctx: &ReleaseContext) -> ReleaseResult<Vec<PluginEntry>> {
  let release_dir = ctx.release_dir();
  let mut plugins = Vec::new();

  let entries =
    fs::read_dir(&ctx.root).with_context(|| format!("Failed to read plugin directory {}", ctx.root.display()))?;

  for entry in entries {
    let entry = entry?;
    let path = entry.path();
    if !path.is_dir() {
      continue;
    }

    let Some(name) = entry.file_name().to_str().map(str::to_string) else {
      tracing::debug!(path = %path.display(), "skipping non UTF-8 directory name");
      continue;
    };

    if name.starts_with('.') || ctx.config.is_excluded(&name) || is_same_dir(&path, &release_dir) {
      tracing::debug!(plugin = %name, "skipping excluded directory");
      continue;
    }

    plugins.push(PluginEntry::new(name, path));
  }

  plugins.sort_by(|a, b| a.name.cmp(&b.name));
  Ok(plugins)
}

fn is_same_dir(a: &Path, b: &Path) -> bool {
  match (fs::canonicalize(a), fs::canonicalize(b)) {
    (Ok(a), Ok(b)) => a == b,
    _ => a == b,
  }
}
