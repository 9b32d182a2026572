//! `sp-release init`: write a default config file

use crate::core::config::CONFIG_FILE_NAMES;
use crate::core::context::ReleaseContext;
use crate::core::env::Environment;
use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use std::fs;
use std::path::Path;
use toml_edit::{DocumentMut, value};

const TEMPLATE: &str = r#"# sp-release configuration

# SourceMod plugins directory. Leave empty to use $SOURCEPAWN_PLUGINS or
# ~/sourcemodAPI/addons/sourcemod/plugins.
plugins_dir = ""

# spcomp binary. Leave empty to use $SOURCEPAWN_SPCOMP or the spcomp next to
# the plugins directory (../scripting/spcomp).
spcomp = ""

# Archives are written here, relative to the working directory
release_dir = "releases"

# Directory names that are never treated as plugins
exclude_plugin_dirs = ["scripts", "docs"]

# Top-level files copied into scripting/ next to the .sp sources
extra_files = ["LICENSE.txt"]

compile_verbosity = "--verbose=2"

# Additional -i include paths for spcomp
extra_include_dirs = []

# Release CLI used to look up and create releases
release_cli = "gh"

# 256-colour palette indices for status output
[colors]
update = 10
archive = 12
nochange = 250
summary = 10
warning = 202
error = 9
"#;

/// Write `sp-release.toml` into the working directory
pub fn run_init(ctx: &ReleaseContext, force: bool) -> ReleaseResult<()> {
  let path = ctx.root.join(CONFIG_FILE_NAMES[0]);
  if path.exists() && !force {
    return Err(ConfigError::AlreadyExists { path }.into());
  }

  // Pre-fill whatever the fallbacks can already find
  let env = Environment::resolve(&Default::default()).ok();
  let content = render_template(env.as_ref())?;

  write_config(&path, &content)?;
  println!("Wrote {}", path.display());
  if env.is_none() {
    println!("Set plugins_dir before running sp-release.");
  }
  Ok(())
}

/// Default config, with `plugins_dir` / `spcomp` filled from `env`
pub fn render_template(env: Option<&Environment>) -> ReleaseResult<String> {
  let mut doc: DocumentMut = TEMPLATE.parse()?;

  if let Some(env) = env {
    doc["plugins_dir"] = value(path_str(&env.plugins_dir)?);
    if let Some(compiler) = &env.compiler {
      doc["spcomp"] = value(path_str(compiler)?);
    }
  }

  Ok(doc.to_string())
}

fn path_str(path: &Path) -> ReleaseResult<&str> {
  path
    .to_str()
    .ok_or_else(|| {
      ReleaseError::with_help(
        format!("Path is not valid UTF-8: {}", path.display()),
        "Edit plugins_dir and spcomp in sp-release.toml by hand.",
      )
    })
}

fn write_config(path: &Path, content: &str) -> ReleaseResult<()> {
  fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
