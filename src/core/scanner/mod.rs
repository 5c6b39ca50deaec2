//! # Scanner Module
//!
//! Lists the files a batch operation works on.
//!
//! Only the top level of a directory is listed; subdirectories and other
//! non-file entries are left out. Entries come back in the order the
//! directory yields them.

use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// List the regular files directly inside `dir`
pub fn list_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("not a directory: {}", dir.display()),
        ));
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);

    for entry in walker {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        } else {
            debug!(path = %entry.path().display(), "skipping non-file entry");
        }
    }

    Ok(files)
}
