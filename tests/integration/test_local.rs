//! Local-only runs (`--no-gh`)

use crate::helpers::*;
use anyhow::Result;

fn local_config(plugins: &TestPlugins) -> Result<()> {
  // Never invoked in local-only mode
  plugins.write_config(&plugins.bin_dir.join("missing-gh"), "")
}

#[test]
fn test_local_run_archives_every_plugin() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("alpha", "0.1.0")?;
  plugins.add_plugin("beta", "2.0")?;
  plugins.add_shared_binary("alpha")?;
  local_config(&plugins)?;

  let output = run_sp_release(&plugins, &["-g"])?;
  let out = stdout(&output);

  assert!(out.contains("alpha 0.1.0\n"));
  assert!(out.contains("beta 2.0\n"));
  assert!(out.trim_end().ends_with("2 archives created"));
  assert!(plugins.file_exists("releases/alpha_v0.1.0.zip"));
  assert!(plugins.file_exists("releases/beta_v2.0.zip"));
  assert!(plugins.gh_calls()?.is_empty());
  Ok(())
}

#[test]
fn test_nogit_alias() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("alpha", "0.1.0")?;
  local_config(&plugins)?;

  let output = run_sp_release(&plugins, &["--nogit", "--nosummary"])?;

  assert!(!stdout(&output).contains("archive"));
  assert!(plugins.file_exists("releases/alpha_v0.1.0.zip"));
  Ok(())
}

#[test]
fn test_bundle_contents() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("foo", "1.0")?;
  plugins.write("foo/helpers.sp", "// helpers\n")?;
  plugins.write("foo/LICENSE.txt", "MIT\n")?;
  plugins.write("foo/README.md", "# foo\n")?;
  plugins.write("foo/include/foo.inc", "// natives\n")?;
  plugins.write("foo/include/sub/extra.inc", "// more\n")?;
  plugins.write("foo/build/notes.sp", "// nested, not bundled\n")?;
  plugins.add_shared_binary("foo")?;
  local_config(&plugins)?;

  let output = run_sp_release(&plugins, &["-g"])?;
  assert!(stderr(&output).contains("copied existing smx file instead of compiling new smx file"));

  let entries = plugins.zip_entries("releases/foo_v1.0.zip")?;
  for expected in [
    "scripting/foo.sp",
    "scripting/helpers.sp",
    "scripting/LICENSE.txt",
    "scripting/include/foo.inc",
    "scripting/include/sub/extra.inc",
    "plugins/foo.smx",
  ] {
    assert!(entries.iter().any(|e| e == expected), "missing {expected} in {entries:?}");
  }
  assert!(!entries.iter().any(|e| e.ends_with("README.md")));
  assert!(!entries.iter().any(|e| e.contains("notes.sp")));
  Ok(())
}

#[test]
fn test_skips_unversioned_and_excluded_dirs() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("foo", "1.0")?;
  plugins.add_plugin("docs", "9.9")?;
  plugins.add_plugin("scripts", "9.9")?;
  plugins.write("empty/.keep", "")?;
  plugins.write("noversion/noversion.sp", "public void OnPluginStart() {}\n")?;
  plugins.write("twice/twice.sp", "version = \"1.0\"\nversion = \"2.0\"\n")?;
  local_config(&plugins)?;

  let output = run_sp_release(&plugins, &["-g"])?;
  let out = stdout(&output);
  let err = stderr(&output);

  assert!(out.contains("1 archive created"));
  assert!(!out.contains("docs"));
  assert!(!out.contains("empty"));
  assert!(err.contains("noversion.sp returned no version matches"));
  assert!(err.contains("twice.sp returned multiple possible version matches"));

  let archives: Vec<_> = std::fs::read_dir(plugins.path.join("releases"))?
    .filter_map(|e| e.ok())
    .map(|e| e.file_name().to_string_lossy().to_string())
    .collect();
  assert_eq!(archives, vec!["foo_v1.0.zip".to_string()]);
  Ok(())
}

#[test]
fn test_quiet_suppresses_status_only() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("foo", "1.0")?;
  local_config(&plugins)?;

  let output = run_sp_release(&plugins, &["-g", "-q"])?;

  assert!(stdout(&output).is_empty());
  assert!(stderr(&output).contains("smx file not found"));
  assert!(plugins.file_exists("releases/foo_v1.0.zip"));
  Ok(())
}

#[test]
fn test_custom_release_dir() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("foo", "1.0")?;
  plugins.write_config(&plugins.bin_dir.join("missing-gh"), "release_dir = \"dist\"\n")?;

  run_sp_release(&plugins, &["-g"])?;

  assert!(plugins.file_exists("dist/foo_v1.0.zip"));
  assert!(!plugins.file_exists("releases"));
  Ok(())
}

#[test]
fn test_empty_version_is_skipped_with_warning() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("foo", "")?;
  local_config(&plugins)?;

  let output = run_sp_release(&plugins, &["-g"])?;

  assert!(stderr(&output).contains("declares an empty version"));
  assert!(!stdout(&output).contains("foo"));
  assert!(!plugins.file_exists("releases/foo_v.zip"));
  Ok(())
}
