//! Coloured status output
//!
//! Status lines (per plugin, summary) go to stdout and are silenced by `--quiet`.
//! Warnings and errors always go to stderr. Colours come from the `[colors]`
//! config table as 8-bit palette indices and are dropped when `NO_COLOR` is set
//! or the stream is not a terminal.

use crate::core::config::ColorConfig;
use anstyle::{Ansi256Color, Color, Style};
use std::io::IsTerminal;

/// Styles per status category
#[derive(Debug, Clone, Copy)]
struct Palette {
  update: Style,
  archive: Style,
  nochange: Style,
  summary: Style,
  warning: Style,
  error: Style,
}

impl Palette {
  fn from_config(colors: &ColorConfig) -> Self {
    let fg = |index: u8| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(index))));
    Self {
      update: fg(colors.update).bold(),
      archive: fg(colors.archive),
      nochange: fg(colors.nochange),
      summary: fg(colors.summary),
      warning: fg(colors.warning),
      error: fg(colors.error),
    }
  }
}

/// Prints run status to the terminal
#[derive(Debug, Clone)]
pub struct Reporter {
  palette: Palette,
  quiet: bool,
  color_stdout: bool,
  color_stderr: bool,
}

impl Reporter {
  /// Reporter for the real terminal
  pub fn new(colors: &ColorConfig, quiet: bool) -> Self {
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    Self {
      palette: Palette::from_config(colors),
      quiet,
      color_stdout: !no_color && std::io::stdout().is_terminal(),
      color_stderr: !no_color && std::io::stderr().is_terminal(),
    }
  }

  /// Uncoloured reporter
  #[cfg(test)]
  pub fn plain(quiet: bool) -> Self {
    Self {
      palette: Palette::from_config(&ColorConfig::default()),
      quiet,
      color_stdout: false,
      color_stderr: false,
    }
  }

  /// Run header
  pub fn header(&self) {
    self.out(Style::new(), "Checking plugins...\n");
  }

  /// Plugin gets a new release
  pub fn updated(&self, name: &str, version: &str) {
    self.out(self.palette.update, &format!("{} -> {}", name, version));
  }

  /// Plugin already released at this version
  pub fn unchanged(&self, name: &str, version: &str) {
    self.out(self.palette.nochange, &format!("{} {}", name, version));
  }

  /// Plugin archived in local-only mode
  pub fn archived(&self, name: &str, version: &str) {
    self.out(self.palette.archive, &format!("{} {}", name, version));
  }

  /// Final count line, preceded by a blank line
  pub fn summary(&self, summary: &Summary) {
    let style = if summary.count > 0 {
      match summary.kind {
        SummaryKind::Updated => self.palette.summary,
        SummaryKind::Archived => self.palette.archive,
      }
    } else {
      Style::new()
    };
    self.out(Style::new(), "");
    self.out(style, &summary.to_string());
  }

  /// Run-level warning
  pub fn warning(&self, message: &str) {
    self.err(self.palette.warning, message);
  }

  /// Warning attached to the plugin currently being processed
  pub fn plugin_warning(&self, message: &str) {
    self.err(self.palette.warning, &format!("  warning: {}", message));
  }

  /// Error attached to the plugin currently being processed
  pub fn plugin_error(&self, message: &str) {
    self.err(self.palette.error, &format!("  error: {}", message));
  }

  fn out(&self, style: Style, text: &str) {
    if self.quiet {
      return;
    }
    println!("{}", paint(style, text, self.color_stdout));
  }

  fn err(&self, style: Style, text: &str) {
    eprintln!("{}", paint(style, text, self.color_stderr));
  }
}

fn paint(style: Style, text: &str, enabled: bool) -> String {
  if enabled && style != Style::new() {
    format!("{}{}{}", style.render(), text, style.render_reset())
  } else {
    text.to_string()
  }
}

/// What the summary counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
  /// Plugins that received a new remote release
  Updated,
  /// Archives created in local-only mode
  Archived,
}

/// Final summary line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
  pub kind: SummaryKind,
  pub count: usize,
}

impl std::fmt::Display for Summary {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let plural = if self.count == 1 { "" } else { "s" };
    match self.kind {
      SummaryKind::Updated => write!(f, "{} plugin{} updated", self.count, plural),
      SummaryKind::Archived => write!(f, "{} archive{} created", self.count, plural),
    }
  }
}
