//! Default command: release every plugin in the working directory

use crate::core::context::ReleaseContext;
use crate::core::env::Environment;
use crate::core::error::ReleaseResult;
use crate::core::host::GhCli;
use crate::release::{PublishMode, ReleaseManager};
use crate::ui::Reporter;

/// Flags for a release run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
  /// Check and create remote releases (false with `--no-gh`)
  pub publish: bool,
  /// Print the summary line
  pub summary: bool,
  /// Suppress status lines on stdout
  pub quiet: bool,
  /// Print a JSON report instead of status lines
  pub json: bool,
}

/// Run the release pipeline
pub fn run_release(ctx: &ReleaseContext, options: RunOptions) -> ReleaseResult<()> {
  let env = Environment::resolve(&ctx.config)?;
  tracing::debug!(
    plugins_dir = %env.plugins_dir.display(),
    compiler = ?env.compiler,
    "environment resolved"
  );

  let reporter = Reporter::new(&ctx.config.colors, options.quiet || options.json);
  if env.compiler.is_none() {
    reporter.warning("Could not find spcomp - will look for existing smx files in plugins directory");
  }

  let host = GhCli::new(ctx.config.release_cli.clone());
  let mode = if options.publish {
    PublishMode::Remote(&host)
  } else {
    PublishMode::LocalOnly
  };

  reporter.header();
  let report = ReleaseManager::new(ctx, &env, &reporter, mode).run()?;

  if options.json {
    println!("{}", report.to_json()?);
  } else if options.summary {
    reporter.summary(&report.summary());
  }

  Ok(())
}
