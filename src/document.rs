//! Reading and atomically rewriting the target document.

use std::fs;
use std::io::Write;
use std::path::Path;

use log::info;
use tempfile::NamedTempFile;

use crate::error::FixError;

/// Reads the whole document, rejecting anything that is not UTF-8.
pub fn read_document(path: &Path) -> Result<String, FixError> {
    let bytes = fs::read(path).map_err(|source| FixError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| FixError::Encoding {
        path: path.to_path_buf(),
    })
}

/// Replaces the document's content.
///
/// Symlinks are followed first, so the file they point at is the one
/// rewritten. The text goes to a temp file beside it that is then renamed
/// over it, so readers see either the old or the new document.
/// Permissions of the existing file are carried over.
pub fn write_document(path: &Path, text: &str) -> Result<(), FixError> {
    let write_err = |source: std::io::Error| FixError::Write {
        path: path.to_path_buf(),
        source,
    };

    let target = fs::canonicalize(path).map_err(write_err)?;
    let dir = target.parent().unwrap_or_else(|| Path::new("/"));

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(text.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    let metadata = fs::metadata(&target).map_err(write_err)?;
    tmp.as_file()
        .set_permissions(metadata.permissions())
        .map_err(write_err)?;

    tmp.persist(&target).map_err(|e| write_err(e.error))?;
    info!("wrote {} bytes to {}", text.len(), target.display());
    Ok(())
}
