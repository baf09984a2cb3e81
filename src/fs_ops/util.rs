use std::io;
use std::path::{Path, is_separator};

use crate::errors::{Result, RoadError};
use crate::kind::{Kind, classify};

/// True when a rename failed because source and destination live on different filesystems.
pub(crate) fn is_cross_device(e: &io::Error) -> bool {
    // std::io::ErrorKind has no stable CrossesDevices variant to match on,
    // so detect EXDEV / ERROR_NOT_SAME_DEVICE via raw OS error codes.
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17,
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => false,
    }
}

/// Accept `name` only if it names a direct child: one component, no separators.
pub(crate) fn single_component(name: &str) -> Result<&str> {
    if name.is_empty() || name == "." || name == ".." || name.contains(is_separator) {
        return Err(RoadError::InvalidName(name.to_string()));
    }
    Ok(name)
}

/// True if any existing ancestor of `path` is itself a symlink.
pub fn has_symlink_ancestor(path: &Path) -> Result<bool> {
    for anc in path.ancestors().skip(1) {
        match classify(anc) {
            Ok(Kind::SymbolicLink) => return Ok(true),
            Ok(_) | Err(RoadError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(false)
}
