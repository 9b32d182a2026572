//! `sp-release doctor`: show what a release run would use

use crate::core::context::ReleaseContext;
use crate::core::env::Environment;
use crate::core::error::ReleaseResult;
use crate::core::host::GhCli;
use crate::plugin;
use crate::plugin::version::{self, VersionLookup, VersionSource};

/// Print the resolved config, directories, tools, and plugins
pub fn run_doctor(ctx: &ReleaseContext) -> ReleaseResult<()> {
  println!("sp-release doctor");
  println!();

  match &ctx.config_path {
    Some(path) => println!("  config:      {}", path.display()),
    None => println!("  config:      (defaults, no sp-release.toml found)"),
  }

  let mut problems = 0;
  match Environment::resolve(&ctx.config) {
    Ok(env) => {
      println!("  plugins dir: {}", env.plugins_dir.display());
      println!("  include dir: {}", env.global_include_dir().display());
      match &env.compiler {
        Some(compiler) => println!("  spcomp:      {}", compiler.display()),
        None => {
          problems += 1;
          println!("  spcomp:      not found (existing .smx files will be used)");
        }
      }
    }
    Err(e) => {
      problems += 1;
      println!("  plugins dir: not found");
      for line in e.to_string().lines().skip(1) {
        println!("    {}", line.trim());
      }
    }
  }

  let host = GhCli::new(ctx.config.release_cli.clone());
  match host.version() {
    Ok(version) => println!("  release cli: {} ({})", host.program(), version),
    Err(e) => {
      problems += 1;
      println!("  release cli: {} unavailable: {}", host.program(), e);
    }
  }

  println!();
  let plugins = plugin::scan(ctx)?;
  println!("Plugins ({}):", plugins.len());
  for plugin in &plugins {
    match version::lookup(plugin) {
      Ok(VersionLookup::Found { version, source }) => {
        let from = match source {
          VersionSource::VersionFile => "version.txt",
          VersionSource::MainSource => "source",
        };
        println!("  {} {} (from {})", plugin.name, version, from);
      }
      Ok(VersionLookup::Ambiguous { matches, .. }) => {
        println!("  {} (skipped: {} version matches)", plugin.name, matches)
      }
      Ok(VersionLookup::NoMatch { .. }) => println!("  {} (skipped: no version match)", plugin.name),
      Ok(VersionLookup::Empty { .. }) => println!("  {} (skipped: empty version)", plugin.name),
      Ok(VersionLookup::Missing) => println!("  {} (skipped: no version)", plugin.name),
      Err(e) => println!("  {} (skipped: {})", plugin.name, e),
    }
  }

  println!();
  if problems == 0 {
    println!("No problems found");
  } else {
    println!("{} problem(s) found", problems);
  }

  Ok(())
}
