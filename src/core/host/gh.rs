//! GitHub releases through the system `gh` CLI
//!
//! Every invocation gets an explicit working directory (the plugin directory), so
//! `gh` resolves the repository from there without touching the process cwd.

use crate::core::error::{ProcessError, ReleaseError, ReleaseResult};
use crate::core::host::{ReleaseHost, ReleaseStatus};
use std::path::Path;
use std::process::{Command, Output};

/// Text `gh release view` prints when the tag has no release
const RELEASE_NOT_FOUND: &str = "release not found";

/// Release host backed by the `gh` binary (or a compatible program)
#[derive(Debug, Clone)]
pub struct GhCli {
  program: String,
}

impl GhCli {
  /// Use `program` as the release CLI (normally `gh`)
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
    }
  }

  /// Program name or path
  pub fn program(&self) -> &str {
    &self.program
  }

  /// First line of `<program> --version`, used by `doctor`
  pub fn version(&self) -> ReleaseResult<String> {
    let output = Command::new(&self.program)
      .arg("--version")
      .output()
      .map_err(|e| self.spawn_error(e))?;

    if !output.status.success() {
      return Err(self.command_error(&["--version"], &output));
    }

    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_string(),
    )
  }

  /// Build a non-interactive command rooted at `dir`
  fn cmd(&self, dir: &Path) -> Command {
    let mut cmd = Command::new(&self.program);
    cmd.current_dir(dir);
    cmd.env("GH_PROMPT_DISABLED", "1");
    cmd.env("NO_COLOR", "1");
    cmd
  }

  fn spawn_error(&self, err: std::io::Error) -> ReleaseError {
    ReleaseError::Process(ProcessError::SpawnFailed {
      program: self.program.clone(),
      reason: err.to_string(),
    })
  }

  fn command_error(&self, args: &[&str], output: &Output) -> ReleaseError {
    ReleaseError::Process(ProcessError::CommandFailed {
      command: format!("{} {}", self.program, args.join(" ")),
      code: output.status.code(),
      stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
  }
}

impl ReleaseHost for GhCli {
  fn release_status(&self, plugin_dir: &Path, tag: &str) -> ReleaseStatus {
    tracing::debug!(program = %self.program, dir = %plugin_dir.display(), tag, "release view");

    let output = match self.cmd(plugin_dir).args(["release", "view", tag]).output() {
      Ok(output) => output,
      Err(e) => return ReleaseStatus::QueryError(self.spawn_error(e).to_string()),
    };

    let stderr = String::from_utf8_lossy(&output.stderr);
    tracing::debug!(code = ?output.status.code(), stderr = %stderr.trim(), "release view finished");
    classify_view(output.status.success(), &stderr)
  }

  fn create_release(&self, plugin_dir: &Path, tag: &str, archive: &Path, notes: Option<&Path>) -> ReleaseResult<()> {
    let mut cmd = self.cmd(plugin_dir);
    cmd.args(["release", "create", tag]).arg(archive);
    if let Some(notes) = notes {
      cmd.arg("-F").arg(notes);
    }
    tracing::debug!(command = ?cmd, "release create");

    let output = cmd.output().map_err(|e| self.spawn_error(e))?;
    if !output.status.success() {
      return Err(self.command_error(&["release", "create", tag], &output));
    }

    tracing::debug!(stdout = %String::from_utf8_lossy(&output.stdout).trim(), "release created");
    Ok(())
  }
}

/// Map a finished `release view` to a status
///
/// Only a failed lookup that explicitly says "release not found" counts as absent;
/// any other failure is a query error, never a silent "no release".
fn classify_view(success: bool, stderr: &str) -> ReleaseStatus {
  if success {
    ReleaseStatus::Found
  } else if stderr.to_lowercase().contains(RELEASE_NOT_FOUND) {
    ReleaseStatus::NotFound
  } else {
    let reason = stderr.trim();
    ReleaseStatus::QueryError(if reason.is_empty() {
      "release lookup failed without output".to_string()
    } else {
      reason.to_string()
    })
  }
}
