//! Access probing.
//! `accessible` answers "can this process use the node in this way right now",
//! downgrading exactly NotFound and PermissionDenied to `false`.

use bitflags::bitflags;
use std::io;
use std::path::Path;

use crate::errors::{Result, RoadError};
use crate::platform;

bitflags! {
    /// Access bits to probe, mirroring access(2).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessMode: u8 {
        const EXISTS = 0;
        const READ = 0b001;
        const WRITE = 0b010;
        const EXECUTE = 0b100;
    }
}

impl Default for AccessMode {
    fn default() -> Self {
        AccessMode::EXISTS
    }
}

pub(crate) fn accessible(path: &Path, mode: AccessMode) -> Result<bool> {
    match platform::probe_access(path, mode) {
        Ok(()) => Ok(true),
        Err(e) => downgrade(e),
    }
}

pub(crate) async fn accessible_async(path: &Path, mode: AccessMode) -> Result<bool> {
    let owned = path.to_path_buf();
    let probe = tokio::task::spawn_blocking(move || platform::probe_access(&owned, mode))
        .await
        .map_err(io::Error::other)?;
    match probe {
        Ok(()) => Ok(true),
        Err(e) => downgrade(e),
    }
}

fn downgrade(e: io::Error) -> Result<bool> {
    match e.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => Ok(false),
        _ => Err(RoadError::Io(e)),
    }
}
