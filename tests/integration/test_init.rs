//! Tests for the `init` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_init_creates_config() -> Result<()> {
  let plugins = TestPlugins::new()?;

  let output = run_sp_release(&plugins, &["init"])?;

  assert!(stdout(&output).contains("Wrote"));
  let config = plugins.read_file("sp-release.toml")?;
  assert!(config.contains("release_dir = \"releases\""));
  assert!(config.contains("exclude_plugin_dirs = [\"scripts\", \"docs\"]"));
  assert!(config.contains("[colors]"));
  Ok(())
}

#[test]
fn test_init_prefills_plugins_dir_from_env() -> Result<()> {
  let plugins = TestPlugins::new()?;
  let bin = env!("CARGO_BIN_EXE_sp-release");

  let output = std::process::Command::new(bin)
    .current_dir(&plugins.path)
    .arg("init")
    .env("SOURCEPAWN_PLUGINS", &plugins.plugins_dir)
    .env_remove("SOURCEPAWN_SPCOMP")
    .env("HOME", &plugins.home)
    .output()?;
  assert!(output.status.success());

  let config = plugins.read_file("sp-release.toml")?;
  assert!(config.contains(&format!("plugins_dir = \"{}\"", plugins.plugins_dir.display())));
  Ok(())
}

#[test]
fn test_init_refuses_existing_config() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.write("sp-release.toml", "release_dir = \"dist\"\n")?;

  let output = run_sp_release_raw(&plugins, &["init"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("--force"));
  assert_eq!(plugins.read_file("sp-release.toml")?, "release_dir = \"dist\"\n");
  Ok(())
}

#[test]
fn test_init_force_replaces_broken_config() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.write("sp-release.toml", "release_dir = [not toml\n")?;

  run_sp_release(&plugins, &["init", "--force"])?;

  let config = plugins.read_file("sp-release.toml")?;
  assert!(config.contains("release_dir = \"releases\""));
  Ok(())
}
