//! Per-plugin release pipeline
//!
//! Plugins are processed one at a time: version lookup, release gate, bundle,
//! binary, archive, publish. A bundle directory lives only for the duration of
//! one plugin's iteration.

use crate::core::context::ReleaseContext;
use crate::core::env::Environment;
use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use crate::core::host::{ReleaseHost, ReleaseStatus, release_tag};
use crate::plugin::archive::create_archive;
use crate::plugin::binary::{BinaryOutcome, Compiler, PLUGINS_DIR, produce_binary};
use crate::plugin::bundle::{SCRIPTING_DIR, copy_scripting_files};
use crate::plugin::{self, PluginEntry, version};
use crate::release::report::{PluginOutcome, PluginReport, RunMode, RunReport};
use crate::ui::Reporter;
use crate::utils::{is_within, remove_dir_if_exists};
use std::fs;
use std::path::PathBuf;

/// Whether archives are published
#[derive(Clone, Copy)]
pub enum PublishMode<'a> {
  /// Check `v<version>` on the host and publish new versions
  Remote(&'a dyn ReleaseHost),
  /// Archive every versioned plugin, never contact a host
  LocalOnly,
}

/// Runs the pipeline over every plugin directory
pub struct ReleaseManager<'a> {
  ctx: &'a ReleaseContext,
  env: &'a Environment,
  compiler: Option<Compiler>,
  reporter: &'a Reporter,
  mode: PublishMode<'a>,
}

impl<'a> ReleaseManager<'a> {
  pub fn new(ctx: &'a ReleaseContext, env: &'a Environment, reporter: &'a Reporter, mode: PublishMode<'a>) -> Self {
    Self {
      ctx,
      env,
      compiler: Compiler::from_env(env, &ctx.config, &ctx.root),
      reporter,
      mode,
    }
  }

  /// Process all eligible plugins in name order
  pub fn run(&self) -> ReleaseResult<RunReport> {
    self.ctx.check_release_dir()?;
    let release_dir = self.ctx.release_dir();
    fs::create_dir_all(&release_dir).with_context(|| format!("Failed to create {}", release_dir.display()))?;

    let mut report = RunReport::new(match self.mode {
      PublishMode::Remote(_) => RunMode::Remote,
      PublishMode::LocalOnly => RunMode::LocalOnly,
    });

    for plugin in plugin::scan(self.ctx)? {
      if let Some(result) = self.process(&plugin) {
        report.push(result);
      }
    }

    Ok(report)
  }

  /// Process one plugin; `None` when it has no usable version
  fn process(&self, plugin: &PluginEntry) -> Option<PluginReport> {
    let lookup = match version::lookup(plugin) {
      Ok(lookup) => lookup,
      Err(e) => {
        self.reporter.plugin_error(&format!("{}: {}", plugin.name, e));
        return None;
      }
    };
    if let Some(warning) = lookup.warning() {
      self.reporter.plugin_warning(&warning);
    }
    let version = lookup.version()?;

    Some(match self.mode {
      PublishMode::LocalOnly => {
        self.reporter.archived(&plugin.name, version);
        self.archive_only(plugin, version)
      }
      PublishMode::Remote(host) => self.release(host, plugin, version),
    })
  }

  fn archive_only(&self, plugin: &PluginEntry, version: &str) -> PluginReport {
    match self.build_archive(plugin, version) {
      Ok((archive, binary)) => {
        PluginReport::new(&plugin.name, version, PluginOutcome::Archived).with_archive(archive, binary)
      }
      Err(e) => self.failed(plugin, version, e.to_string()),
    }
  }

  fn release(&self, host: &dyn ReleaseHost, plugin: &PluginEntry, version: &str) -> PluginReport {
    let tag = release_tag(version);

    match host.release_status(&plugin.path, &tag) {
      ReleaseStatus::Found => {
        self.reporter.unchanged(&plugin.name, version);
        PluginReport::new(&plugin.name, version, PluginOutcome::Unchanged)
      }
      ReleaseStatus::QueryError(reason) => {
        self.reporter.unchanged(&plugin.name, version);
        self
          .reporter
          .plugin_warning(&format!("could not check release {}, skipping: {}", tag, reason));
        PluginReport::new(&plugin.name, version, PluginOutcome::QueryFailed).with_detail(reason)
      }
      ReleaseStatus::NotFound => {
        self.reporter.updated(&plugin.name, version);
        let (archive, binary) = match self.build_archive(plugin, version) {
          Ok(built) => built,
          Err(e) => return self.failed(plugin, version, e.to_string()),
        };
        let report = PluginReport::new(&plugin.name, version, PluginOutcome::Released).with_archive(archive, binary);
        self.publish(host, plugin, &tag, report)
      }
    }
  }

  fn publish(&self, host: &dyn ReleaseHost, plugin: &PluginEntry, tag: &str, mut report: PluginReport) -> PluginReport {
    let Some(archive) = report.archive.clone().filter(|a| a.is_file()) else {
      let missing = self.ctx.archive_path(&plugin.name, &report.version);
      let message = format!("could not find newly created archive \"{}\"", missing.display());
      self.reporter.plugin_error(&message);
      report.outcome = PluginOutcome::PublishFailed;
      return report.with_detail(message);
    };

    let notes = plugin.changelog();
    match host.create_release(&plugin.path, tag, &archive, notes.as_deref()) {
      Ok(()) => report,
      Err(e) => {
        self.reporter.plugin_error(&format!("error creating release: {}", e));
        report.outcome = PluginOutcome::PublishFailed;
        report.with_detail(e.to_string())
      }
    }
  }

  /// Assemble `<release_dir>/<plugin>/`, zip it, and remove it
  fn build_archive(&self, plugin: &PluginEntry, version: &str) -> ReleaseResult<(PathBuf, BinaryOutcome)> {
    let bundle = self.ctx.bundle_dir(&plugin.name);
    if is_within(&plugin.path, &bundle) {
      return Err(ReleaseError::message(format!(
        "Refusing to bundle {} into {}: the bundle directory holds its sources",
        plugin.name,
        bundle.display()
      )));
    }
    // Left over from an interrupted run
    remove_dir_if_exists(&bundle)?;

    let result = self.assemble(plugin, version, &bundle);
    if result.is_err() {
      let _ = remove_dir_if_exists(&bundle);
    }
    result
  }

  fn assemble(&self, plugin: &PluginEntry, version: &str, bundle: &std::path::Path) -> ReleaseResult<(PathBuf, BinaryOutcome)> {
    fs::create_dir_all(bundle).with_context(|| format!("Failed to create {}", bundle.display()))?;

    copy_scripting_files(&self.ctx.config, plugin, &bundle.join(SCRIPTING_DIR))?;
    let binary = produce_binary(
      self.compiler.as_ref(),
      self.env,
      plugin,
      &bundle.join(PLUGINS_DIR),
      self.reporter,
    )?;

    let archive = self.ctx.archive_path(&plugin.name, version);
    create_archive(bundle, &archive)?;
    Ok((archive, binary))
  }

  fn failed(&self, plugin: &PluginEntry, version: &str, message: String) -> PluginReport {
    self.reporter.plugin_error(&message);
    PluginReport::new(&plugin.name, version, PluginOutcome::Failed).with_detail(message)
  }
}
