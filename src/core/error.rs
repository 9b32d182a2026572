//! Error types for sp-release with contextual messages and exit codes
//!
//! Errors are categorized so `main` can pick an exit code and print a help line.
//! Per-plugin failures are reported by the release pipeline and never reach `main`;
//! only setup failures (config, missing plugins directory) end the process early.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for sp-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, missing directories, invalid args)
  User = 1,
  /// System error (I/O, subprocesses)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for sp-release
#[derive(Debug)]
pub enum ReleaseError {
  /// Configuration and environment errors
  Config(ConfigError),

  /// External process errors (compiler, release CLI)
  Process(ProcessError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// Structured variants are flattened into a message so the context is never lost.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      other => {
        let help = other.help_message();
        ReleaseError::Message {
          message: ctx_str,
          context: Some(other.to_string()),
          help,
        }
      }
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Config(_) => ExitCode::User,
      ReleaseError::Process(_) => ExitCode::System,
      ReleaseError::Io(_) => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Process(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      ReleaseError::Io(_) => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Process(e) => write!(f, "{}", e),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<ConfigError> for ReleaseError {
  fn from(err: ConfigError) -> Self {
    ReleaseError::Config(err)
  }
}

impl From<ProcessError> for ReleaseError {
  fn from(err: ProcessError) -> Self {
    ReleaseError::Process(err)
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::TomlError> for ReleaseError {
  fn from(err: toml_edit::TomlError) -> Self {
    ReleaseError::message(format!("TOML parse error: {}", err))
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<zip::result::ZipError> for ReleaseError {
  fn from(err: zip::result::ZipError) -> Self {
    ReleaseError::message(format!("Archive error: {}", err))
  }
}

impl From<walkdir::Error> for ReleaseError {
  fn from(err: walkdir::Error) -> Self {
    match err.into_io_error() {
      Some(io_err) => ReleaseError::Io(io_err),
      None => ReleaseError::message("Directory walk error: symbolic link loop detected"),
    }
  }
}

impl From<std::path::StripPrefixError> for ReleaseError {
  fn from(err: std::path::StripPrefixError) -> Self {
    ReleaseError::message(format!("Path strip prefix error: {}", err))
  }
}

/// Configuration and environment errors
#[derive(Debug)]
pub enum ConfigError {
  /// No usable plugins directory from config, env var, or fallback
  PluginsDirNotFound { tried: Vec<PathBuf> },

  /// A required field is empty
  EmptyField { field: String },

  /// Config file exists but could not be parsed
  Invalid { path: PathBuf, reason: String },

  /// `init` would overwrite an existing config
  AlreadyExists { path: PathBuf },

  /// `release_dir` is the working directory or one of its parents
  ReleaseDirContainsSources { release_dir: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::PluginsDirNotFound { .. } => Some(
        "Set `plugins_dir` in sp-release.toml or export SOURCEPAWN_PLUGINS=<path to addons/sourcemod/plugins>."
          .to_string(),
      ),
      ConfigError::Invalid { .. } => Some("Run `sp-release init --force` to regenerate a default config.".to_string()),
      ConfigError::AlreadyExists { .. } => Some("Pass --force to overwrite it.".to_string()),
      ConfigError::ReleaseDirContainsSources { .. } => {
        Some("Point `release_dir` at a subdirectory, e.g. release_dir = \"releases\".".to_string())
      }
      ConfigError::EmptyField { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::PluginsDirNotFound { tried } => {
        write!(f, "Could not find suitable plugins folder")?;
        for path in tried {
          write!(f, "\n  tried: {}", path.display())?;
        }
        Ok(())
      }
      ConfigError::EmptyField { field } => {
        write!(f, "Config field `{}` must not be empty", field)
      }
      ConfigError::Invalid { path, reason } => {
        write!(f, "Invalid config {}: {}", path.display(), reason)
      }
      ConfigError::AlreadyExists { path } => {
        write!(f, "Config already exists: {}", path.display())
      }
      ConfigError::ReleaseDirContainsSources { release_dir } => {
        write!(
          f,
          "release_dir {} contains the plugin directories, bundling would delete sources",
          release_dir.display()
        )
      }
    }
  }
}

/// External process errors
#[derive(Debug)]
pub enum ProcessError {
  /// The program could not be started at all
  SpawnFailed { program: String, reason: String },

  /// The program ran and exited unsuccessfully
  CommandFailed {
    command: String,
    code: Option<i32>,
    stderr: String,
  },
}

impl ProcessError {
  fn help_message(&self) -> Option<String> {
    match self {
      ProcessError::SpawnFailed { program, .. } if program == "gh" => Some(
        "Install the GitHub CLI (https://cli.github.com) and run `gh auth login`, or pass --no-gh.".to_string(),
      ),
      ProcessError::CommandFailed { stderr, .. } if stderr.contains("auth") => {
        Some("Check your release CLI login with `gh auth status`.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for ProcessError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ProcessError::SpawnFailed { program, reason } => {
        write!(f, "Failed to run {}: {}", program, reason)
      }
      ProcessError::CommandFailed { command, code, stderr } => {
        match code {
          Some(code) => write!(f, "Command failed with exit code {}: {}", code, command)?,
          None => write!(f, "Command terminated by signal: {}", command)?,
        }
        let stderr = stderr.trim();
        if !stderr.is_empty() {
          write!(f, "\n{}", stderr)?;
        }
        Ok(())
      }
    }
  }
}

/// Result type alias for sp-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Print a fatal error to stderr with its help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\nerror: {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("help: {}\n", help);
  }
}
