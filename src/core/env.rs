//! Environment resolution for the plugins directory and the spcomp compiler
//!
//! Policy order for both: explicit config value, then environment variable,
//! then a conventional fallback path. A missing plugins directory is fatal; a
//! missing compiler only switches the run to "existing binaries only".

use crate::core::config::ReleaseConfig;
use crate::core::error::{ConfigError, ReleaseError, ReleaseResult};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming addons/sourcemod/plugins
pub const PLUGINS_ENV: &str = "SOURCEPAWN_PLUGINS";

/// Environment variable naming the spcomp binary
pub const SPCOMP_ENV: &str = "SOURCEPAWN_SPCOMP";

#[cfg(windows)]
const SPCOMP_NAME: &str = "spcomp.exe";
#[cfg(not(windows))]
const SPCOMP_NAME: &str = "spcomp";

/// Compiled plugin binary extension
pub const BINARY_EXTENSION: &str = "smx";

/// Resolved paths for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
  /// Shared plugin-binaries directory (absolute)
  pub plugins_dir: PathBuf,

  /// spcomp path, `None` when no compiler could be found
  pub compiler: Option<PathBuf>,
}

impl Environment {
  /// Resolve against the real process environment
  pub fn resolve(config: &ReleaseConfig) -> ReleaseResult<Self> {
    Self::resolve_with(config, |key| std::env::var_os(key), dirs::home_dir())
  }

  /// Resolve with an injected environment lookup and home directory
  pub fn resolve_with<F>(config: &ReleaseConfig, env: F, home: Option<PathBuf>) -> ReleaseResult<Self>
  where
    F: Fn(&str) -> Option<OsString>,
  {
    let plugins_dir = resolve_plugins_dir(config, &env, home)?;
    let compiler = resolve_compiler(config, &env, &plugins_dir);

    tracing::debug!(plugins_dir = %plugins_dir.display(), "resolved plugins directory");
    match &compiler {
      Some(path) => tracing::debug!(compiler = %path.display(), "resolved compiler"),
      None => tracing::debug!("no compiler found"),
    }

    Ok(Self { plugins_dir, compiler })
  }

  /// `<plugins_dir>/../scripting/include`, the SourceMod include directory
  pub fn global_include_dir(&self) -> PathBuf {
    self.sourcemod_dir().join("scripting").join("include")
  }

  /// Where the shared copy of a plugin's binary lives
  pub fn shared_binary(&self, plugin_name: &str) -> PathBuf {
    self
      .plugins_dir
      .join(format!("{}.{}", plugin_name, BINARY_EXTENSION))
  }

  fn sourcemod_dir(&self) -> &Path {
    self.plugins_dir.parent().unwrap_or(&self.plugins_dir)
  }
}

fn resolve_plugins_dir<F>(config: &ReleaseConfig, env: &F, home: Option<PathBuf>) -> ReleaseResult<PathBuf>
where
  F: Fn(&str) -> Option<OsString>,
{
  let mut tried = Vec::new();

  let candidates = [
    config.plugins_dir.clone(),
    env(PLUGINS_ENV).filter(|v| !v.is_empty()).map(PathBuf::from),
    home.map(|h| h.join("sourcemodAPI").join("addons").join("sourcemod").join("plugins")),
  ];

  for candidate in candidates.into_iter().flatten() {
    if candidate.is_dir() {
      return fs::canonicalize(&candidate).map_err(|e| {
        ReleaseError::message(format!(
          "Failed to resolve plugins folder {}: {}",
          candidate.display(),
          e
        ))
      });
    }
    tried.push(candidate);
  }

  Err(ReleaseError::Config(ConfigError::PluginsDirNotFound { tried }))
}

fn resolve_compiler<F>(config: &ReleaseConfig, env: &F, plugins_dir: &Path) -> Option<PathBuf>
where
  F: Fn(&str) -> Option<OsString>,
{
  let fallback = plugins_dir
    .parent()
    .unwrap_or(plugins_dir)
    .join("scripting")
    .join(SPCOMP_NAME);

  [
    config.spcomp.clone(),
    env(SPCOMP_ENV).filter(|v| !v.is_empty()).map(PathBuf::from),
    Some(fallback),
  ]
  .into_iter()
  .flatten()
  .find(|p| p.is_file())
}
