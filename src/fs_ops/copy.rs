//! Copy helpers.
//! - copy_file: byte copy plus best-effort timestamp preservation; a no-op onto itself.
//! - copy_tree: recursive copy that merges into an existing destination and
//!   refuses to land inside its own source.
//! - *_across: the copy+remove fallbacks used when a rename hits EXDEV.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::metadata::preserve_times;
use crate::errors::{Result, RoadError};
use crate::platform;

/// Copy one regular file, replacing `dest` if it is already a file.
/// When `dest` is `src` (same path or a hard link) nothing is written and 0 is returned.
pub(crate) fn copy_file(src: &Path, dest: &Path) -> Result<u64> {
    let meta = fs::metadata(src).map_err(RoadError::at(src))?;
    if platform::same_file(src, dest)? {
        debug!(src = %src.display(), dest = %dest.display(), "source and destination are one file");
        return Ok(0);
    }
    let bytes = fs::copy(src, dest)?;
    preserve_times(dest, &meta);
    Ok(bytes)
}

/// Create a link at `dest` storing `target` verbatim.
/// Any non-directory already at `dest` is replaced.
pub(crate) fn relink(target: &Path, dest: &Path) -> Result<()> {
    match fs::symlink_metadata(dest) {
        Ok(meta) if !meta.is_dir() => fs::remove_file(dest)?,
        Ok(_) => {
            return Err(RoadError::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("directory in the way of link {}", dest.display()),
            )));
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    platform::symlink(target, dest)?;
    Ok(())
}

/// Canonical form of `path`, where any missing tail is appended to its
/// nearest existing ancestor.
fn landing(path: &Path) -> io::Result<PathBuf> {
    let path = std::path::absolute(path)?;
    match dunce::canonicalize(&path) {
        Ok(p) => Ok(p),
        Err(e) if e.kind() == io::ErrorKind::NotFound => match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => Ok(landing(parent)?.join(name)),
            _ => Err(e),
        },
        Err(e) => Err(e),
    }
}

/// Recursively copy the tree at `src` into `dest`, merging with whatever is already there.
/// Directories are created as needed, files overwrite same-named files, links are
/// recreated as links, and special nodes are skipped. Returns the number of files copied.
///
/// Copying a tree onto itself copies nothing. A `dest` inside `src` is refused
/// with `IntoItself` before anything is written.
pub(crate) fn copy_tree(src: &Path, dest: &Path) -> Result<u64> {
    let from = dunce::canonicalize(src).map_err(RoadError::at(src))?;
    let to = landing(dest)?;
    if to == from {
        debug!(src = %src.display(), "tree copied onto itself; nothing to do");
        return Ok(0);
    }
    if to.starts_with(&from) {
        return Err(RoadError::IntoItself { src: from, dest: to });
    }

    let mut files = 0u64;
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        let rel = entry.path().strip_prefix(src).map_err(io::Error::other)?;
        let target = dest.join(rel);
        let ft = entry.file_type();

        if ft.is_dir() {
            fs::create_dir_all(&target)?;
        } else if ft.is_file() {
            copy_file(entry.path(), &target)?;
            files += 1;
        } else if ft.is_symlink() {
            let link_target = fs::read_link(entry.path())?;
            relink(&link_target, &target)?;
        } else {
            warn!(path = %entry.path().display(), "skipping special node during tree copy");
        }
    }
    debug!(src = %src.display(), dest = %dest.display(), files, "copied tree");
    Ok(files)
}

pub(crate) fn move_file_across(src: &Path, dest: &Path) -> Result<()> {
    copy_file(src, dest)?;
    fs::remove_file(src).map_err(RoadError::at(src))?;
    Ok(())
}

pub(crate) fn move_tree_across(src: &Path, dest: &Path) -> Result<()> {
    copy_tree(src, dest)?;
    fs::remove_dir_all(src).map_err(RoadError::at(src))?;
    Ok(())
}
