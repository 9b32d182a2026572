//! Filesystem helpers

use crate::core::error::ReleaseResult;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Recursively copy `src` into `dest`, following symbolic links
///
/// Links (to files or directories) are materialized as regular files and
/// directories. Returns the number of files copied.
pub fn copy_dir_all(src: &Path, dest: &Path) -> ReleaseResult<usize> {
  let mut copied = 0;

  for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
    let entry = entry?;
    let target = dest.join(entry.path().strip_prefix(src)?);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&target)?;
    } else {
      if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
      }
      fs::copy(entry.path(), &target)?;
      copied += 1;
    }
  }

  Ok(copied)
}

/// Remove a directory tree if it exists
pub fn remove_dir_if_exists(path: &Path) -> ReleaseResult<bool> {
  match fs::remove_dir_all(path) {
    Ok(()) => Ok(true),
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
    Err(e) => Err(e.into()),
  }
}

/// Whether `path` is `dir` or lies inside it, after resolving links
///
/// Paths that do not exist are never inside anything.
pub fn is_within(path: &Path, dir: &Path) -> bool {
  match (fs::canonicalize(path), fs::canonicalize(dir)) {
    (Ok(path), Ok(dir)) => path.starts_with(dir),
    _ => false,
  }
}

/// Remove a directory only if it is empty, ignoring failures
pub fn remove_empty_dir(path: &Path) {
  if fs::read_dir(path).is_ok_and(|mut entries| entries.next().is_none()) {
    let _ = fs::remove_dir(path);
  }
}
