//! Zip a release bundle and remove the bundle directory

use crate::core::error::{ReleaseResult, ResultExt};
use crate::utils::remove_dir_if_exists;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Zip `bundle_dir` into `archive`, then delete `bundle_dir`
///
/// Entry names are relative to the bundle root (`scripting/foo.sp`,
/// `plugins/foo.smx`) and always use `/`. An existing archive is overwritten.
/// Returns the number of files archived.
pub fn create_archive(bundle_dir: &Path, archive: &Path) -> ReleaseResult<usize> {
  let files = write_zip(bundle_dir, archive).with_context(|| format!("Failed to create {}", archive.display()))?;
  remove_dir_if_exists(bundle_dir).with_context(|| format!("Failed to remove {}", bundle_dir.display()))?;

  tracing::debug!(archive = %archive.display(), files, "archive created");
  Ok(files)
}

fn write_zip(bundle_dir: &Path, archive: &Path) -> ReleaseResult<usize> {
  let file = File::create(archive)?;
  let mut zip = ZipWriter::new(BufWriter::new(file));
  let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
  let mut files = 0;

  for entry in WalkDir::new(bundle_dir).min_depth(1).sort_by_file_name() {
    let entry = entry?;
    let name = entry
      .path()
      .strip_prefix(bundle_dir)?
      .components()
      .map(|c| c.as_os_str().to_string_lossy())
      .collect::<Vec<_>>()
      .join("/");

    if entry.file_type().is_dir() {
      zip.add_directory(name, options)?;
    } else {
      zip.start_file(name, options)?;
      let mut source = File::open(entry.path())?;
      io::copy(&mut source, &mut zip)?;
      files += 1;
    }
  }

  zip.finish()?;
  Ok(files)
}
