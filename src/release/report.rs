//! Per-run results, printed as a summary line or as JSON

use crate::plugin::binary::BinaryOutcome;
use crate::ui::{Summary, SummaryKind};
use serde::Serialize;
use std::path::PathBuf;

/// What happened to one plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginOutcome {
  /// Archived and published as a new remote release
  Released,
  /// A release for this version already exists
  Unchanged,
  /// Archived in local-only mode
  Archived,
  /// The release lookup failed, nothing was done
  QueryFailed,
  /// Archived, but the remote release could not be created
  PublishFailed,
  /// Bundling or archiving failed
  Failed,
}

/// Result for one plugin
#[derive(Debug, Clone, Serialize)]
pub struct PluginReport {
  pub name: String,
  pub version: String,
  pub outcome: PluginOutcome,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub archive: Option<PathBuf>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub binary: Option<BinaryOutcome>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub detail: Option<String>,
}

impl PluginReport {
  pub fn new(name: &str, version: &str, outcome: PluginOutcome) -> Self {
    Self {
      name: name.to_string(),
      version: version.to_string(),
      outcome,
      archive: None,
      binary: None,
      detail: None,
    }
  }

  pub fn with_archive(mut self, archive: PathBuf, binary: BinaryOutcome) -> Self {
    self.archive = Some(archive);
    self.binary = Some(binary);
    self
  }

  pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
    self.detail = Some(detail.into());
    self
  }
}

/// Whether the run talked to a release host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
  Remote,
  LocalOnly,
}

/// Results for a whole run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
  pub mode: RunMode,
  pub plugins: Vec<PluginReport>,
}

impl RunReport {
  pub fn new(mode: RunMode) -> Self {
    Self {
      mode,
      plugins: Vec::new(),
    }
  }

  pub fn push(&mut self, report: PluginReport) {
    self.plugins.push(report);
  }

  /// Plugins that got a new remote release
  pub fn updated(&self) -> usize {
    self.count(PluginOutcome::Released)
  }

  /// Archives created in local-only mode
  pub fn archived(&self) -> usize {
    self.count(PluginOutcome::Archived)
  }

  pub fn count(&self, outcome: PluginOutcome) -> usize {
    self.plugins.iter().filter(|p| p.outcome == outcome).count()
  }

  /// Summary line for this run's mode
  pub fn summary(&self) -> Summary {
    match self.mode {
      RunMode::Remote => Summary {
        kind: SummaryKind::Updated,
        count: self.updated(),
      },
      RunMode::LocalOnly => Summary {
        kind: SummaryKind::Archived,
        count: self.archived(),
      },
    }
  }

  /// JSON document with per-plugin results and counts
  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({
      "mode": self.mode,
      "updated": self.updated(),
      "archived": self.archived(),
      "plugins": self.plugins,
    }))
  }
}
