//! Binary half of a release bundle
//!
//! With a compiler available the plugin is compiled into `<bundle>/plugins/` and
//! the fresh `.smx` is deployed to the shared plugins directory. Without one, or
//! when compilation fails, the last deployed `.smx` from the shared directory is
//! bundled instead.

use crate::core::config::ReleaseConfig;
use crate::core::env::{BINARY_EXTENSION, Environment};
use crate::core::error::{ProcessError, ReleaseError, ReleaseResult, ResultExt};
use crate::plugin::PluginEntry;
use crate::ui::Reporter;
use crate::utils::remove_empty_dir;
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Bundle subdirectory for compiled plugins
pub const PLUGINS_DIR: &str = "plugins";

/// How the bundle got its binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOutcome {
  /// Freshly compiled
  Compiled,
  /// Copied from the shared plugins directory (possibly stale)
  CopiedExisting,
  /// No binary in the bundle
  Missing,
}

/// spcomp invocation settings
#[derive(Debug, Clone)]
pub struct Compiler {
  program: PathBuf,
  work_dir: PathBuf,
  global_include: PathBuf,
  verbosity: String,
  extra_include_dirs: Vec<PathBuf>,
}

impl Compiler {
  /// Compiler for this run, `None` when the environment has no spcomp
  pub fn from_env(env: &Environment, config: &ReleaseConfig, work_dir: &Path) -> Option<Self> {
    env.compiler.as_ref().map(|program| Self {
      program: program.clone(),
      work_dir: work_dir.to_path_buf(),
      global_include: env.global_include_dir(),
      verbosity: config.compile_verbosity.clone(),
      extra_include_dirs: config.extra_include_dirs.clone(),
    })
  }

  /// Arguments for compiling `plugin` into `out`
  ///
  /// `<main.sp> -o<out> -i<dir> -i<dir>/include -i<global include> -O2 <verbosity> [-i<extra>...]`
  pub fn args(&self, plugin: &PluginEntry, out: &Path) -> Vec<OsString> {
    let mut args = vec![
      plugin.main_source().into_os_string(),
      flag("-o", out),
      flag("-i", &plugin.path),
      flag("-i", &plugin.include_dir()),
      flag("-i", &self.global_include),
      OsString::from("-O2"),
    ];
    if !self.verbosity.is_empty() {
      args.push(OsString::from(&self.verbosity));
    }
    for dir in &self.extra_include_dirs {
      args.push(flag("-i", dir));
    }
    args
  }

  /// Compile `plugin` into `out`
  ///
  /// Succeeds only when spcomp exits zero and `out` exists afterwards.
  pub fn compile(&self, plugin: &PluginEntry, out: &Path) -> ReleaseResult<()> {
    let args = self.args(plugin, out);
    tracing::debug!(program = %self.program.display(), ?args, "compiling");

    let output = Command::new(&self.program)
      .args(&args)
      .current_dir(&self.work_dir)
      .output()
      .map_err(|e| {
        ReleaseError::Process(ProcessError::SpawnFailed {
          program: self.program.display().to_string(),
          reason: e.to_string(),
        })
      })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    tracing::debug!(plugin = %plugin.name, code = ?output.status.code(), %stdout, %stderr, "compiler finished");

    if !output.status.success() {
      // spcomp reports diagnostics on stdout
      let diagnostics = if stderr.trim().is_empty() { stdout } else { stderr };
      return Err(ReleaseError::Process(ProcessError::CommandFailed {
        command: format!("{} {}", self.program.display(), plugin.main_source().display()),
        code: output.status.code(),
        stderr: diagnostics.to_string(),
      }));
    }

    if !out.is_file() {
      return Err(ReleaseError::message(format!(
        "Compiler exited successfully but produced no {}",
        out.display()
      )));
    }

    Ok(())
  }
}

fn flag(prefix: &str, path: &Path) -> OsString {
  let mut arg = OsString::from(prefix);
  arg.push(path.as_os_str());
  arg
}

/// Put the plugin's binary into `dest` (the bundle's `plugins/` directory)
///
/// Compile and fallback failures are reported through `reporter`; only I/O
/// errors while copying a found binary are returned.
pub fn produce_binary(
  compiler: Option<&Compiler>,
  env: &Environment,
  plugin: &PluginEntry,
  dest: &Path,
  reporter: &Reporter,
) -> ReleaseResult<BinaryOutcome> {
  let file_name = format!("{}.{}", plugin.name, BINARY_EXTENSION);

  if let Some(compiler) = compiler {
    if plugin.main_source().is_file() {
      fs::create_dir_all(dest).with_context(|| format!("Failed to create {}", dest.display()))?;
      let out = dest.join(&file_name);

      match compiler.compile(plugin, &out) {
        Ok(()) => {
          if let Err(e) = deploy(&out, &env.shared_binary(&plugin.name)) {
            reporter.plugin_warning(&e.to_string());
          }
          return Ok(BinaryOutcome::Compiled);
        }
        Err(e) => {
          tracing::debug!(plugin = %plugin.name, error = %e, "compile failed");
          reporter.plugin_error(&format!("error occurred compiling smx file {}", plugin.name));
          let _ = fs::remove_file(&out);
          remove_empty_dir(dest);
        }
      }
    } else {
      tracing::debug!(plugin = %plugin.name, "no main source to compile");
    }
  }

  copy_existing(env, plugin, dest, &file_name, reporter)
}

/// Deploy a fresh build to the shared plugins directory
fn deploy(built: &Path, shared: &Path) -> ReleaseResult<()> {
  fs::copy(built, shared).with_context(|| format!("could not deploy {} to {}", built.display(), shared.display()))?;
  tracing::debug!(to = %shared.display(), "deployed binary");
  Ok(())
}

fn copy_existing(
  env: &Environment,
  plugin: &PluginEntry,
  dest: &Path,
  file_name: &str,
  reporter: &Reporter,
) -> ReleaseResult<BinaryOutcome> {
  let shared = env.shared_binary(&plugin.name);
  if !shared.is_file() {
    reporter.plugin_error(&format!("smx file not found: {}", shared.display()));
    return Ok(BinaryOutcome::Missing);
  }

  fs::create_dir_all(dest).with_context(|| format!("Failed to create {}", dest.display()))?;
  fs::copy(&shared, dest.join(file_name)).with_context(|| format!("Failed to copy {}", shared.display()))?;
  reporter.plugin_warning("copied existing smx file instead of compiling new smx file");
  Ok(BinaryOutcome::CopiedExisting)
}
