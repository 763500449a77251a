use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Result of listing a target directory.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: Vec<PathBuf>,
    pub errors: Vec<(PathBuf, String)>,
}

/// List the regular files directly inside `directory`, sorted by name.
///
/// Subdirectories are not descended into. Symlinks count when their target is
/// a regular file. Entries that cannot be read are reported in `errors`
/// instead of failing the scan.
pub fn scan_directory(directory: &Path) -> Result<ScanResult> {
    if !directory.is_dir() {
        return Err(Error::DirectoryNotFound(directory.to_path_buf()));
    }

    let mut result = ScanResult::default();
    let walker = walkdir::WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.path().is_file() {
                    result.files.push(entry.into_path());
                }
            }
            Err(error) => {
                let path = error
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| directory.to_path_buf());
                result.errors.push((path, error.to_string()));
            }
        }
    }

    Ok(result)
}
