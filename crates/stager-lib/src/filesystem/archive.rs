//! Gzip-compressed tar archives for distribution

use crate::primitives::{BuildError, BuildResult};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io::{self, ErrorKind};
use std::path::Path;
use tar::{Builder, HeaderMode};
use tracing::info;

/// Pack `input_dir` into `archive_path`, nesting its contents under `root_entry/`
///
/// Returns the size of the written archive in bytes. The input directory must
/// exist; an existing archive at the same path is replaced.
pub fn create_tar_gz(input_dir: &Path, archive_path: &Path, root_entry: &str) -> BuildResult<u64> {
    if !input_dir.is_dir() {
        return Err(BuildError::io(
            input_dir,
            io::Error::new(ErrorKind::NotFound, "archive input directory does not exist"),
        ));
    }

    if let Some(parent) = archive_path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
    }

    let file = File::create(archive_path).map_err(|e| BuildError::io(archive_path, e))?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = Builder::new(encoder);
    builder.mode(HeaderMode::Deterministic);
    builder.follow_symlinks(false);

    builder
        .append_dir_all(root_entry, input_dir)
        .map_err(|e| BuildError::io(input_dir, e))?;

    let encoder = builder
        .into_inner()
        .map_err(|e| BuildError::io(archive_path, e))?;
    let file = encoder
        .finish()
        .map_err(|e| BuildError::io(archive_path, e))?;
    file.sync_all().map_err(|e| BuildError::io(archive_path, e))?;

    let size = fs::metadata(archive_path)
        .map_err(|e| BuildError::io(archive_path, e))?
        .len();
    info!(
        archive = %archive_path.display(),
        root = root_entry,
        bytes = size,
        "Created archive"
    );
    Ok(size)
}

#[cfg(test)]
mod tests {
    include!("archive.test.rs");
}
