//! Release runs against a fake `gh`
#![cfg(unix)]

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_new_version_is_released() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("foo", "1.2.0")?;
  plugins.add_plugin("bar", "2.0.0")?;
  plugins.add_shared_binary("foo")?;
  plugins.add_shared_binary("bar")?;
  let gh = fake_gh(&plugins, &["bar@v2.0.0"])?;
  plugins.write_config(&gh, "")?;

  let output = run_sp_release(&plugins, &[])?;
  let out = stdout(&output);

  assert!(out.starts_with("Checking plugins...\n"));
  assert!(out.contains("bar 2.0.0\n"));
  assert!(out.contains("foo -> 1.2.0\n"));
  assert!(out.trim_end().ends_with("1 plugin updated"));

  assert!(plugins.file_exists("releases/foo_v1.2.0.zip"));
  assert!(!plugins.file_exists("releases/bar_v2.0.0.zip"));
  assert!(!plugins.file_exists("releases/foo"));

  let entries = plugins.zip_entries("releases/foo_v1.2.0.zip")?;
  assert!(entries.contains(&"scripting/foo.sp".to_string()));
  assert!(entries.contains(&"plugins/foo.smx".to_string()));

  let calls = plugins.gh_calls()?;
  assert!(calls.contains(&"bar|release view v2.0.0".to_string()));
  assert!(calls.contains(&"foo|release view v1.2.0".to_string()));
  let creates: Vec<_> = calls.iter().filter(|c| c.contains("release create")).collect();
  assert_eq!(creates.len(), 1);
  assert!(creates[0].starts_with("foo|release create v1.2.0 "));
  assert!(creates[0].ends_with("releases/foo_v1.2.0.zip"));

  Ok(())
}

#[test]
fn test_version_file_wins_over_source() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("foo", "0.0.1")?;
  plugins.write("foo/version.txt", "\n3.1.4\n")?;
  let gh = fake_gh(&plugins, &[])?;
  plugins.write_config(&gh, "")?;

  let output = run_sp_release(&plugins, &["--no-summary"])?;

  assert!(stdout(&output).contains("foo -> 3.1.4"));
  assert!(!stdout(&output).contains("updated"));
  assert!(plugins.file_exists("releases/foo_v3.1.4.zip"));
  Ok(())
}

#[test]
fn test_changelog_is_used_as_notes() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("foo", "1.0.0")?;
  plugins.write("foo/CHANGELOG.md", "## 1.0.0\n- initial release\n")?;
  let gh = fake_gh(&plugins, &[])?;
  plugins.write_config(&gh, "")?;

  run_sp_release(&plugins, &[])?;

  let calls = plugins.gh_calls()?;
  let create = calls
    .iter()
    .find(|c| c.contains("release create"))
    .expect("release created");
  let notes = format!("-F {}", plugins.path.join("foo/CHANGELOG.md").display());
  assert!(create.ends_with(&notes), "{create}");
  Ok(())
}

#[test]
fn test_query_failure_is_not_a_release() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("foo", "1.0.0")?;
  let gh = failing_gh(&plugins)?;
  plugins.write_config(&gh, "")?;

  let output = run_sp_release(&plugins, &[])?;

  assert!(stdout(&output).contains("foo 1.0.0\n"));
  assert!(stdout(&output).contains("0 plugins updated"));
  assert!(stderr(&output).contains("could not check release v1.0.0"));
  assert!(stderr(&output).contains("HTTP 401"));
  assert!(!plugins.file_exists("releases/foo_v1.0.0.zip"));
  assert!(plugins.gh_calls()?.iter().all(|c| !c.contains("create")));
  Ok(())
}

#[test]
fn test_compiles_with_spcomp() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("foo", "1.0.0")?;
  plugins.write("foo/include/foo.inc", "// shared natives\n")?;
  fake_spcomp(&plugins)?;
  let gh = fake_gh(&plugins, &[])?;
  plugins.write_config(&gh, "")?;

  let output = run_sp_release(&plugins, &[])?;

  assert!(!stderr(&output).contains("Could not find spcomp"));
  assert_eq!(std::fs::read_to_string(plugins.plugins_dir.join("foo.smx"))?, "compiled");

  let entries = plugins.zip_entries("releases/foo_v1.0.0.zip")?;
  assert!(entries.contains(&"plugins/foo.smx".to_string()));
  assert!(entries.contains(&"scripting/include/foo.inc".to_string()));
  Ok(())
}

#[test]
fn test_compile_failure_falls_back_to_shared_binary() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("foo", "1.0.0")?;
  plugins.write("foo/foo.sp", "#error broken\nversion = \"1.0.0\"\n")?;
  plugins.add_shared_binary("foo")?;
  fake_spcomp(&plugins)?;
  let gh = fake_gh(&plugins, &[])?;
  plugins.write_config(&gh, "")?;

  let output = run_sp_release(&plugins, &[])?;
  let err = stderr(&output);

  assert!(err.contains("error occurred compiling smx file foo"));
  assert!(err.contains("copied existing smx file instead of compiling new smx file"));
  assert!(stdout(&output).contains("1 plugin updated"));
  assert!(
    plugins
      .zip_entries("releases/foo_v1.0.0.zip")?
      .contains(&"plugins/foo.smx".to_string())
  );
  Ok(())
}

#[test]
fn test_deploy_failure_is_only_a_warning() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("foo", "1.0.0")?;
  // a directory in the way makes the copy fail
  std::fs::create_dir_all(plugins.plugins_dir.join("foo.smx"))?;
  fake_spcomp(&plugins)?;
  let gh = fake_gh(&plugins, &[])?;
  plugins.write_config(&gh, "")?;

  let output = run_sp_release(&plugins, &[])?;

  assert!(stderr(&output).contains("could not deploy"));
  assert!(stdout(&output).contains("1 plugin updated"));
  assert!(
    plugins
      .zip_entries("releases/foo_v1.0.0.zip")?
      .contains(&"plugins/foo.smx".to_string())
  );
  Ok(())
}

#[test]
fn test_json_report() -> Result<()> {
  let plugins = TestPlugins::new()?;
  plugins.add_plugin("foo", "1.2.0")?;
  plugins.add_plugin("bar", "2.0.0")?;
  let gh = fake_gh(&plugins, &["bar@v2.0.0"])?;
  plugins.write_config(&gh, "")?;

  let output = run_sp_release(&plugins, &["--json"])?;
  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(report["mode"], "remote");
  assert_eq!(report["updated"], 1);
  assert_eq!(report["plugins"][0]["name"], "bar");
  assert_eq!(report["plugins"][0]["outcome"], "unchanged");
  assert_eq!(report["plugins"][1]["name"], "foo");
  assert_eq!(report["plugins"][1]["outcome"], "released");
  assert_eq!(report["plugins"][1]["binary"], "missing");
  Ok(())
}
