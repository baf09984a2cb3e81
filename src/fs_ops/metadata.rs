//! Timestamp preservation for copies.
//! Best-effort: a failure to set times is logged and never fails the copy.

use filetime::{FileTime, set_file_times};
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

/// Copy atime/mtime from `src_meta` onto `dest`.
pub(crate) fn preserve_times(dest: &Path, src_meta: &fs::Metadata) {
    let at = FileTime::from_last_access_time(src_meta);
    let mt = FileTime::from_last_modification_time(src_meta);
    if let Err(e) = set_file_times(dest, at, mt) {
        warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on copy");
    } else {
        trace!(path = %dest.display(), "set atime/mtime on copy");
    }
}
