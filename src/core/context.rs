//! Run context - build once, pass everywhere
//!
//! The working directory and the immutable configuration are loaded once in
//! `main.rs` and handed to every command by reference. Nothing in the pipeline
//! reads global state or changes the process working directory.

use crate::core::config::ReleaseConfig;
use crate::core::error::{ConfigError, ReleaseResult};
use crate::utils::is_within;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared run-level data
#[derive(Debug, Clone)]
pub struct ReleaseContext {
  /// Working directory containing one subdirectory per plugin (absolute path)
  pub root: PathBuf,

  /// Configuration file that was loaded, if any
  pub config_path: Option<PathBuf>,

  /// Configuration for this run
  pub config: Arc<ReleaseConfig>,
}

impl ReleaseContext {
  /// Build context from a working directory, loading config from it
  pub fn build(root: &Path) -> ReleaseResult<Self> {
    let config_path = ReleaseConfig::find_config_path(root);
    let config = ReleaseConfig::load(root)?;
    let ctx = Self::with_config(root, config_path, config);
    ctx.check_release_dir()?;
    Ok(ctx)
  }

  /// Build context around an already-loaded config
  pub fn with_config(root: &Path, config_path: Option<PathBuf>, config: ReleaseConfig) -> Self {
    Self {
      root: root.to_path_buf(),
      config_path,
      config: Arc::new(config),
    }
  }

  /// Absolute release output directory
  pub fn release_dir(&self) -> PathBuf {
    self.root.join(&self.config.release_dir)
  }

  /// Reject a release directory that is the working directory or one of its parents
  ///
  /// Bundles are created as `<release_dir>/<plugin>` and deleted after zipping,
  /// so such a directory would make the bundle the plugin's own sources.
  pub fn check_release_dir(&self) -> ReleaseResult<()> {
    let release_dir = self.release_dir();
    if is_within(&self.root, &release_dir) {
      return Err(ConfigError::ReleaseDirContainsSources { release_dir }.into());
    }
    Ok(())
  }

  /// Bundle directory for a plugin, `<release_dir>/<plugin>`
  pub fn bundle_dir(&self, plugin_name: &str) -> PathBuf {
    self.release_dir().join(plugin_name)
  }

  /// Archive path for a plugin version, `<release_dir>/<plugin>_v<version>.zip`
  pub fn archive_path(&self, plugin_name: &str, version: &str) -> PathBuf {
    self.release_dir().join(archive_name(plugin_name, version))
  }
}

/// Deterministic archive file name
pub fn archive_name(plugin_name: &str, version: &str) -> String {
  format!("{}_v{}.zip", plugin_name, version)
}
