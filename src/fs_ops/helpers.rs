//! Human-readable error text for user-facing output.
//!
//! The library returns OS errors untouched; these helpers only render them with
//! an operation, a path and a platform-aware hint, for the `road` binary and for
//! callers that want the same wording.
//!
//! Usage:
//!   out::print_error(&describe_road_error("list", dir.location(), &err));

use std::io;
use std::path::Path;

use crate::errors::RoadError;

/// Hint for a raw OS error code, if we have one.
fn os_hint(code: i32) -> Option<&'static str> {
    #[cfg(unix)]
    {
        match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and mode bits"),
            libc::EXDEV => Some("cross-filesystem; rename cannot cross devices"),
            libc::EBUSY => Some("resource busy; another process is using it"),
            libc::ENOENT => Some("path not found; verify it exists"),
            libc::EEXIST => Some("already exists; remove it or choose another name"),
            libc::ENOTEMPTY => Some("directory not empty"),
            libc::ENOTDIR => Some("a path component is not a directory"),
            libc::EISDIR => Some("is a directory"),
            libc::ENOSPC => Some("insufficient space on device"),
            libc::EROFS => Some("read-only filesystem"),
            libc::ELOOP => Some("too many symbolic link levels; possible symlink cycle"),
            libc::ENAMETOOLONG => Some("filename or path too long"),
            libc::EMFILE | libc::ENFILE => Some("too many open files"),
            _ => None,
        }
    }
    #[cfg(windows)]
    {
        match code {
            5 => Some("access denied; check permissions"),
            17 => Some("not same device; rename cannot cross devices"),
            32 => Some("sharing violation; file is in use"),
            2 | 3 => Some("path not found; verify it exists"),
            80 | 183 => Some("already exists; remove it or choose another name"),
            112 => Some("insufficient disk space"),
            _ => None,
        }
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = code;
        None
    }
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and mode bits"),
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists; remove it or choose another name"),
        _ => None,
    }
}

/// "<op> '<path>': <error> (<hint>) [os code: N]"
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{op} '{}': {e}", path.display());
    let hint = match e.raw_os_error() {
        Some(code) => os_hint(code),
        None => kind_hint(e.kind()),
    };
    if let Some(h) = hint {
        msg.push_str(&format!(" ({h})"));
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Render any crate error; OS errors get the hint treatment, the rest use their Display.
pub fn describe_road_error(op: &str, path: &Path, e: &RoadError) -> String {
    match e {
        RoadError::Io(ioe) => describe_io_error(op, path, ioe),
        other => format!("{op} '{}': {other}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Kind;

    #[test]
    fn not_found_fallback_hint_includes_path() {
        let p = Path::new("/nonexistent/path/for/test");
        let msg = describe_io_error("open", p, &io::Error::from(io::ErrorKind::NotFound));
        assert!(msg.contains("open"));
        assert!(msg.contains("/nonexistent/path/for/test"));
        assert!(msg.contains("path not found"));
        assert!(!msg.contains("os code"));
    }

    #[cfg(unix)]
    #[test]
    fn raw_codes_get_hint_and_code() {
        let msg = describe_io_error("rename", Path::new("/a"), &io::Error::from_raw_os_error(libc::EXDEV));
        assert!(msg.contains("cross-filesystem"), "msg was: {msg}");
        assert!(msg.contains("os code"));
    }

    #[test]
    fn library_refusals_use_display() {
        let e = RoadError::NotMutable("/x".into());
        let msg = describe_road_error("delete", Path::new("/x"), &e);
        assert!(msg.starts_with("delete '/x': Handle is not mutable"));
        let e = RoadError::NotSupported { kind: Kind::Socket, path: "/s".into() };
        assert!(describe_road_error("move", Path::new("/s"), &e).contains("socket"));
    }
}
