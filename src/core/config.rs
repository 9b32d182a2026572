use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file names, searched in order
pub const CONFIG_FILE_NAMES: [&str; 3] = ["sp-release.toml", ".sp-release.toml", ".config/sp-release.toml"];

/// Configuration for sp-release
/// Searched in order: sp-release.toml, .sp-release.toml, .config/sp-release.toml
///
/// Every key is optional; a missing file yields [`ReleaseConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseConfig {
  /// Location of addons/sourcemod/plugins (falls back to SOURCEPAWN_PLUGINS, then ~/sourcemodAPI/...)
  #[serde(deserialize_with = "non_empty_path")]
  pub plugins_dir: Option<PathBuf>,

  /// Location of spcomp (falls back to SOURCEPAWN_SPCOMP, then <plugins_dir>/../scripting/spcomp)
  #[serde(deserialize_with = "non_empty_path")]
  pub spcomp: Option<PathBuf>,

  /// Zip archives are stored here (relative to the working directory)
  pub release_dir: PathBuf,

  /// Directories that are never treated as plugins
  pub exclude_plugin_dirs: Vec<String>,

  /// Extra files copied into `scripting/` when present in a plugin directory
  pub extra_files: Vec<String>,

  /// Verbosity flag passed to spcomp (empty = none)
  pub compile_verbosity: String,

  /// Extra include paths passed to spcomp
  pub extra_include_dirs: Vec<PathBuf>,

  /// Release hosting CLI (must understand `release view` / `release create`)
  pub release_cli: String,

  pub colors: ColorConfig,
}

/// 8-bit ANSI palette indices per status category
///
/// See <https://en.wikipedia.org/wiki/ANSI_escape_code#8-bit>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
  /// Plugins with a new release
  pub update: u8,
  /// Plugins archived in local-only mode
  pub archive: u8,
  /// Plugins without a new release
  pub nochange: u8,
  /// Updated count in the summary
  pub summary: u8,
  pub warning: u8,
  pub error: u8,
}

impl Default for ColorConfig {
  fn default() -> Self {
    Self {
      update: 10,
      archive: 12,
      nochange: 250,
      summary: 10,
      warning: 202,
      error: 9,
    }
  }
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      plugins_dir: None,
      spcomp: None,
      release_dir: PathBuf::from("releases"),
      exclude_plugin_dirs: vec!["scripts".to_string(), "docs".to_string()],
      extra_files: vec!["LICENSE.txt".to_string()],
      compile_verbosity: "--verbose=2".to_string(),
      extra_include_dirs: Vec::new(),
      release_cli: "gh".to_string(),
      colors: ColorConfig::default(),
    }
  }
}

/// Treat `""` like an absent key, so a blank `plugins_dir = ""` means "use the fallbacks"
fn non_empty_path<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<String>::deserialize(deserializer)?;
  Ok(value.filter(|s| !s.trim().is_empty()).map(PathBuf::from))
}

impl ReleaseConfig {
  /// Find config file in search order
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
      .iter()
      .map(|name| path.join(name))
      .find(|p| p.is_file())
  }

  /// Load config from the working directory, or defaults when no file exists
  pub fn load(path: &Path) -> ReleaseResult<Self> {
    match Self::find_config_path(path) {
      Some(config_path) => Self::load_file(&config_path),
      None => {
        tracing::debug!(dir = %path.display(), "no config file found, using defaults");
        Ok(Self::default())
      }
    }
  }

  /// Load and validate a specific config file
  pub fn load_file(config_path: &Path) -> ReleaseResult<Self> {
    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content).map_err(|e| {
      ReleaseError::Config(ConfigError::Invalid {
        path: config_path.to_path_buf(),
        reason: e.to_string(),
      })
    })?;
    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
  }

  /// Parse and validate config text
  pub fn parse(content: &str) -> ReleaseResult<Self> {
    let config: ReleaseConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Validate fields that have no sensible empty value
  pub fn validate(&self) -> ReleaseResult<()> {
    if self.release_dir.as_os_str().is_empty() {
      return Err(ReleaseError::Config(ConfigError::EmptyField {
        field: "release_dir".to_string(),
      }));
    }

    if self.release_cli.trim().is_empty() {
      return Err(ReleaseError::Config(ConfigError::EmptyField {
        field: "release_cli".to_string(),
      }));
    }

    Ok(())
  }

  /// Check whether a directory name is excluded from plugin scanning
  pub fn is_excluded(&self, dir_name: &str) -> bool {
    self.exclude_plugin_dirs.iter().any(|d| d == dir_name)
  }

  /// Check whether a top-level file should be bundled in addition to `*.sp`
  pub fn is_extra_file(&self, file_name: &str) -> bool {
    self.extra_files.iter().any(|f| f == file_name)
  }
}
