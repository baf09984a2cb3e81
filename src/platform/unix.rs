//! Unix implementations of platform helpers.

use std::ffi::CString;
use std::fs::Metadata;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use crate::access::AccessMode;

/// Raw `st_mode` from lstat metadata.
#[inline]
pub(crate) fn raw_mode(meta: &Metadata) -> u32 {
    meta.mode()
}

/// access(2) probe. Ok(()) means the requested mode is granted.
pub(crate) fn probe_access(path: &Path, mode: AccessMode) -> io::Result<()> {
    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains null byte"))?;
    let mut flags = libc::F_OK;
    if mode.contains(AccessMode::READ) {
        flags |= libc::R_OK;
    }
    if mode.contains(AccessMode::WRITE) {
        flags |= libc::W_OK;
    }
    if mode.contains(AccessMode::EXECUTE) {
        flags |= libc::X_OK;
    }
    let rc = unsafe { libc::access(c_path.as_ptr(), flags) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// True when both paths reach the same inode. A missing `b` is never the same.
pub(crate) fn same_file(a: &Path, b: &Path) -> io::Result<bool> {
    let ma = std::fs::metadata(a)?;
    let mb = match std::fs::metadata(b) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    Ok(ma.dev() == mb.dev() && ma.ino() == mb.ino())
}

pub(crate) fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

pub(crate) async fn symlink_async(target: &Path, link: &Path) -> io::Result<()> {
    tokio::fs::symlink(target, link).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    #[test]
    fn probe_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let err = probe_access(&dir.path().join("nope"), AccessMode::EXISTS).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn probe_execute_on_plain_file_fails() {
        // root bypasses read/write checks but not execute on a file with no x bits.
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        fs::write(&path, b"x").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        assert!(probe_access(&path, AccessMode::READ | AccessMode::WRITE).is_ok());
        assert!(probe_access(&path, AccessMode::EXECUTE).is_err());
    }

    #[test]
    fn hard_links_are_the_same_file() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, b"x").unwrap();
        fs::hard_link(&a, &b).unwrap();
        assert!(same_file(&a, &b).unwrap());
        assert!(!same_file(&a, &dir.path().join("missing")).unwrap());
        fs::write(dir.path().join("c"), b"x").unwrap();
        assert!(!same_file(&a, &dir.path().join("c")).unwrap());
    }
}
