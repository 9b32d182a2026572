//! Release hosting abstraction
//!
//! The release gate only needs two questions answered by a hosting service:
//! does a release tagged `v<version>` exist, and can a new one be created.
//! [`GhCli`] answers them through the system `gh` binary.

pub mod gh;

pub use gh::GhCli;

use crate::core::error::ReleaseResult;
use std::path::Path;

/// Outcome of looking up a release tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseStatus {
  /// A release with this tag is already published
  Found,
  /// The host confirmed that no release has this tag
  NotFound,
  /// The lookup itself failed (network, auth, missing CLI, ...)
  QueryError(String),
}

/// A service that stores tagged releases
pub trait ReleaseHost {
  /// Look up `tag` for the repository containing `plugin_dir`
  fn release_status(&self, plugin_dir: &Path, tag: &str) -> ReleaseStatus;

  /// Publish `archive` as a new release tagged `tag`, with optional release notes
  fn create_release(&self, plugin_dir: &Path, tag: &str, archive: &Path, notes: Option<&Path>) -> ReleaseResult<()>;
}

/// Release tag for a plugin version
pub fn release_tag(version: &str) -> String {
  format!("v{}", version)
}
