//! Platform-specific helpers.
//! This module hides OS differences (Unix/Windows) behind a uniform API so
//! the classifier and handles can remain platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub(crate) use unix::{probe_access, raw_mode, same_file, symlink, symlink_async};

#[cfg(not(unix))]
pub(crate) use windows::{probe_access, raw_mode, same_file, symlink, symlink_async};
