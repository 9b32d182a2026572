mod commands;
mod core;
mod plugin;
mod release;
mod ui;
mod utils;

use clap::{Parser, Subcommand};
use commands::RunOptions;
use crate::core::config::ReleaseConfig;
use crate::core::context::ReleaseContext;
use crate::core::error::{ReleaseError, print_error};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "SP_RELEASE_LOG";

/// Build, archive, and publish SourceMod plugin releases
#[derive(Parser)]
#[command(name = "sp-release")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Only create local archives, never call the release CLI
  #[arg(short = 'g', long, visible_alias = "nogit")]
  no_gh: bool,

  /// Don't print the summary line
  #[arg(short = 's', long, visible_alias = "nosummary")]
  no_summary: bool,

  /// Suppress status output (warnings and errors are still printed)
  #[arg(short, long, global = true)]
  quiet: bool,

  /// Print debug diagnostics to stderr
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Print the run report as JSON
  #[arg(long)]
  json: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Write a default sp-release.toml into the current directory
  Init {
    /// Overwrite an existing sp-release.toml
    #[arg(long)]
    force: bool,
  },

  /// Show the resolved environment and eligible plugins
  Doctor,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn init_tracing(verbose: bool) {
  let default = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  let ctx = match ReleaseContext::build(&root) {
    Ok(ctx) => ctx,
    // init must be able to replace a broken config
    Err(e) if matches!(cli.command, Some(Commands::Init { force: true })) => {
      eprintln!("Warning: ignoring existing config: {}", e);
      ReleaseContext::with_config(&root, None, ReleaseConfig::default())
    }
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Some(Commands::Init { force }) => commands::run_init(&ctx, force),
    Some(Commands::Doctor) => commands::run_doctor(&ctx),
    None => commands::run_release(
      &ctx,
      RunOptions {
        publish: !cli.no_gh,
        summary: !cli.no_summary,
        quiet: cli.quiet,
        json: cli.json,
      },
    ),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
