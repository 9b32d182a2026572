//! Tests for the `doctor` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_doctor_reports_missing_plugins_dir() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("foo", "1.0")?;

  let output = run_sp_release(&plugins, &["doctor"])?;
  let out = stdout(&output);

  assert!(out.contains("config:      (defaults"));
  assert!(out.contains("plugins dir: not found"));
  assert!(out.contains("foo 1.0"));
  assert!(!plugins.file_exists("releases"));
  Ok(())
}

#[cfg(unix)]
#[test]
fn test_doctor_reports_environment() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("foo", "1.0")?;
  plugins.write("bar/version.txt", "2.0\n")?;
  plugins.write("baz/baz.sp", "// nothing here\n")?;
  fake_spcomp(&plugins)?;
  let gh = fake_gh(&plugins, &[])?;
  plugins.write_config(&gh, "")?;

  let output = run_sp_release(&plugins, &["doctor"])?;
  let out = stdout(&output);

  assert!(out.contains(&format!("plugins dir: {}", plugins.plugins_dir.display())));
  assert!(out.contains(&format!("spcomp:      {}", plugins.scripting_dir.join("spcomp").display())));
  assert!(out.contains("gh version 2.40.0 (fake)"));
  assert!(out.contains("Plugins (3):"));
  assert!(out.contains("bar 2.0"));
  assert!(out.contains("baz (skipped:"));
  assert!(out.contains("No problems found"));
  assert!(!plugins.file_exists("releases"));
  Ok(())
}
