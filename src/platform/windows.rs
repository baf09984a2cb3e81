//! Non-Unix implementations of platform helpers (best-effort).
//!
//! Notes:
//! - There is no st_mode; the type bits are synthesized from `FileType`.
//! - Access probing only knows about existence and the readonly attribute.

use std::fs::Metadata;
use std::io;
use std::path::Path;

use crate::access::AccessMode;
use crate::kind::{S_IFDIR, S_IFLNK, S_IFREG};

pub(crate) fn raw_mode(meta: &Metadata) -> u32 {
    let ft = meta.file_type();
    if ft.is_symlink() {
        S_IFLNK
    } else if ft.is_dir() {
        S_IFDIR
    } else if ft.is_file() {
        S_IFREG
    } else {
        0
    }
}

pub(crate) fn probe_access(path: &Path, mode: AccessMode) -> io::Result<()> {
    let meta = std::fs::metadata(path)?;
    if mode.contains(AccessMode::WRITE) && meta.permissions().readonly() {
        return Err(io::Error::from(io::ErrorKind::PermissionDenied));
    }
    Ok(())
}

/// No stable inode here; compare canonical paths instead.
pub(crate) fn same_file(a: &Path, b: &Path) -> io::Result<bool> {
    let ca = dunce::canonicalize(a)?;
    match dunce::canonicalize(b) {
        Ok(cb) => Ok(ca == cb),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

pub(crate) fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

pub(crate) async fn symlink_async(target: &Path, link: &Path) -> io::Result<()> {
    if tokio::fs::metadata(target).await.map(|m| m.is_dir()).unwrap_or(false) {
        tokio::fs::symlink_dir(target, link).await
    } else {
        tokio::fs::symlink_file(target, link).await
    }
}
