//! Scripting half of a release bundle
//!
//! Copies from the plugin directory into `<bundle>/scripting/`:
//! - every top-level `*.sp` file
//! - top-level files named in `extra_files`
//! - the whole `include/` tree, with symbolic links materialized as real files
//!
//! Nothing else from the plugin directory (docs, screenshots, CHANGELOG.md) is bundled.

use crate::core::config::ReleaseConfig;
use crate::core::error::{ReleaseResult, ResultExt};
use crate::plugin::{INCLUDE_DIR, PluginEntry, SOURCE_EXTENSION};
use crate::utils::copy_dir_all;
use std::fs;
use std::path::Path;

/// Bundle subdirectory for sources
pub const SCRIPTING_DIR: &str = "scripting";

/// Copy a plugin's sources into `dest`
///
/// Returns the number of files copied. An empty plugin directory creates nothing.
pub fn copy_scripting_files(config: &ReleaseConfig, plugin: &PluginEntry, dest: &Path) -> ReleaseResult<usize> {
  let mut entries = fs::read_dir(&plugin.path)
    .with_context(|| format!("Failed to read {}", plugin.path.display()))?
    .collect::<Result<Vec<_>, _>>()?;

  if entries.is_empty() {
    return Ok(0);
  }
  entries.sort_by_key(|e| e.file_name());

  fs::create_dir_all(dest).with_context(|| format!("Failed to create {}", dest.display()))?;

  let mut copied = 0;
  for entry in entries {
    let path = entry.path();
    let Some(name) = entry.file_name().to_str().map(str::to_string) else {
      continue;
    };

    if path.is_file() && (is_source_file(&path) || config.is_extra_file(&name)) {
      fs::copy(&path, dest.join(&name)).with_context(|| format!("Failed to copy {}", path.display()))?;
      copied += 1;
    } else if path.is_dir() && name == INCLUDE_DIR {
      copied += copy_dir_all(&path, &dest.join(INCLUDE_DIR))
        .with_context(|| format!("Failed to copy include directory {}", path.display()))?;
    }
  }

  tracing::debug!(plugin = %plugin.name, files = copied, "copied scripting files");
  Ok(copied)
}

fn is_source_file(path: &Path) -> bool {
  path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}
