//! Mode classifier.
//! Maps an OS file-mode bitmask, or a path via lstat, to one of seven node kinds.
//! Symlinks are reported as `SymbolicLink`, never as their target's kind.

use std::fmt;
use std::path::Path;

use crate::errors::{Result, RoadError};
use crate::platform;

/// POSIX file type bits. Spelled out so the mask is identical on every target.
pub(crate) const S_IFMT: u32 = 0o170000;
pub(crate) const S_IFSOCK: u32 = 0o140000;
pub(crate) const S_IFLNK: u32 = 0o120000;
pub(crate) const S_IFREG: u32 = 0o100000;
pub(crate) const S_IFBLK: u32 = 0o060000;
pub(crate) const S_IFDIR: u32 = 0o040000;
pub(crate) const S_IFCHR: u32 = 0o020000;
pub(crate) const S_IFIFO: u32 = 0o010000;

/// What sits at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    RegularFile,
    Directory,
    SymbolicLink,
    BlockDevice,
    CharacterDevice,
    Fifo,
    Socket,
}

impl Kind {
    pub const ALL: [Kind; 7] = [
        Kind::RegularFile,
        Kind::Directory,
        Kind::SymbolicLink,
        Kind::BlockDevice,
        Kind::CharacterDevice,
        Kind::Fifo,
        Kind::Socket,
    ];

    /// Classify a raw `st_mode` value.
    pub fn from_mode(mode: u32) -> Result<Kind> {
        match mode & S_IFMT {
            S_IFREG => Ok(Kind::RegularFile),
            S_IFDIR => Ok(Kind::Directory),
            S_IFLNK => Ok(Kind::SymbolicLink),
            S_IFBLK => Ok(Kind::BlockDevice),
            S_IFCHR => Ok(Kind::CharacterDevice),
            S_IFIFO => Ok(Kind::Fifo),
            S_IFSOCK => Ok(Kind::Socket),
            _ => Err(RoadError::UnknownKind { mode }),
        }
    }

    /// Devices, FIFOs and sockets: observable but never mutated by this crate.
    pub fn is_unusable(self) -> bool {
        matches!(
            self,
            Kind::BlockDevice | Kind::CharacterDevice | Kind::Fifo | Kind::Socket
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Kind::RegularFile => "regular file",
            Kind::Directory => "directory",
            Kind::SymbolicLink => "symbolic link",
            Kind::BlockDevice => "block device",
            Kind::CharacterDevice => "character device",
            Kind::Fifo => "FIFO",
            Kind::Socket => "socket",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify whatever is at `path` without following a final symlink.
pub fn classify(path: impl AsRef<Path>) -> Result<Kind> {
    let path = path.as_ref();
    let meta = std::fs::symlink_metadata(path).map_err(RoadError::at(path))?;
    Kind::from_mode(platform::raw_mode(&meta))
}

/// Async form of [`classify`].
pub async fn classify_async(path: impl AsRef<Path>) -> Result<Kind> {
    let path = path.as_ref();
    let meta = tokio::fs::symlink_metadata(path)
        .await
        .map_err(RoadError::at(path))?;
    Kind::from_mode(platform::raw_mode(&meta))
}
