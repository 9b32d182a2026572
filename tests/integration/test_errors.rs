//! Fatal errors and exit codes

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_missing_plugins_dir_is_fatal() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("foo", "1.0")?;

  let output = run_sp_release_raw(&plugins, &["-g"])?;
  let err = stderr(&output);

  assert_eq!(output.status.code(), Some(1));
  assert!(err.contains("Could not find suitable plugins folder"));
  assert!(err.contains("sourcemodAPI"));
  assert!(err.contains("SOURCEPAWN_PLUGINS"));
  assert!(!plugins.file_exists("releases"));
  Ok(())
}

#[test]
fn test_invalid_config_is_reported() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.write("sp-release.toml", "release_dirr = \"out\"\n")?;

  let output = run_sp_release_raw(&plugins, &[])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Invalid config"));
  assert!(stderr(&output).contains("init --force"));
  Ok(())
}

#[test]
fn test_release_dir_at_root_is_rejected() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("foo", "1.0")?;
  plugins.write("foo/notes.md", "keep me\n")?;
  plugins.write_config(&plugins.bin_dir.join("missing-gh"), "release_dir = \".\"\n")?;

  let output = run_sp_release_raw(&plugins, &["-g"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("contains the plugin directories"));
  assert!(plugins.file_exists("foo/foo.sp"));
  assert!(plugins.file_exists("foo/notes.md"));
  assert!(!plugins.file_exists("foo_v1.0.zip"));
  Ok(())
}

#[cfg(unix)]
#[test]
fn test_plugin_failures_keep_exit_code_zero() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("foo", "1.0")?;
  let gh = failing_gh(&plugins)?;
  plugins.write_config(&gh, "")?;

  let output = run_sp_release_raw(&plugins, &[])?;

  assert_eq!(output.status.code(), Some(0));
  Ok(())
}
