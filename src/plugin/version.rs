//! Plugin version lookup
//!
//! `version.txt` always wins when it has a non-blank line. Otherwise the main
//! source file is searched for `version = "..."` (spaces around `=` optional).
//! The pattern is deliberately loose: it also matches inside comments or longer
//! identifiers such as `myversion="x"`, so a plugin must contain exactly one
//! such assignment for the lookup to succeed.

use crate::core::error::{ReleaseResult, ResultExt};
use crate::plugin::PluginEntry;
use regex::Regex;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"(?:version ?= ?")([^"]*)(?:")"#).expect("invalid regex"));

/// Result of a version lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionLookup {
  /// Exactly one version was found
  Found { version: String, source: VersionSource },
  /// The main source has more than one candidate assignment
  Ambiguous { file: PathBuf, matches: usize },
  /// The main source has no candidate assignment
  NoMatch { file: PathBuf },
  /// The only candidate assignment is blank
  Empty { file: PathBuf },
  /// Neither `version.txt` nor the main source exists
  Missing,
}

/// Where a version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
  VersionFile,
  MainSource,
}

impl VersionLookup {
  /// The version, if exactly one was found
  pub fn version(&self) -> Option<&str> {
    match self {
      VersionLookup::Found { version, .. } => Some(version),
      _ => None,
    }
  }

  /// Warning text for lookups that found a source file but no usable version
  pub fn warning(&self) -> Option<String> {
    match self {
      VersionLookup::Ambiguous { file, .. } => {
        Some(format!("{} returned multiple possible version matches", file.display()))
      }
      VersionLookup::NoMatch { file } => Some(format!("{} returned no version matches", file.display())),
      VersionLookup::Empty { file } => Some(format!("{} declares an empty version", file.display())),
      _ => None,
    }
  }
}

/// Determine a plugin's version
pub fn lookup(plugin: &PluginEntry) -> ReleaseResult<VersionLookup> {
  let version_file = plugin.version_file();
  if version_file.is_file() {
    let text = fs::read_to_string(&version_file)
      .with_context(|| format!("Failed to read {}", version_file.display()))?;
    if let Some(version) = first_non_blank_line(&text) {
      return Ok(VersionLookup::Found {
        version: version.to_string(),
        source: VersionSource::VersionFile,
      });
    }
    tracing::debug!(plugin = %plugin.name, "version.txt is blank, checking main source");
  }

  let main_source = plugin.main_source();
  if !main_source.is_file() {
    return Ok(VersionLookup::Missing);
  }

  // Sources are not guaranteed UTF-8 (legacy encodings in comments)
  let bytes = fs::read(&main_source).with_context(|| format!("Failed to read {}", main_source.display()))?;
  let text = String::from_utf8_lossy(&bytes);

  let mut matches = extract_versions(&text);
  Ok(match matches.len() {
    1 if matches[0].trim().is_empty() => VersionLookup::Empty { file: main_source },
    1 => VersionLookup::Found {
      version: matches.remove(0),
      source: VersionSource::MainSource,
    },
    0 => VersionLookup::NoMatch { file: main_source },
    n => VersionLookup::Ambiguous {
      file: main_source,
      matches: n,
    },
  })
}

/// Every `version = "..."` value in `source`, in order
pub fn extract_versions(source: &str) -> Vec<String> {
  VERSION_PATTERN
    .captures_iter(source)
    .filter_map(|c| c.get(1))
    .map(|m| m.as_str().to_string())
    .collect()
}

fn first_non_blank_line(text: &str) -> Option<&str> {
  text.lines().map(str::trim).find(|line| !line.is_empty())
}
