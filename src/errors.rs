//! Typed error definitions for road_fs.
//! The three ways a mutation can be refused stay distinguishable:
//! the handle's own flag (`NotMutable`), the node kind (`NotSupported`),
//! and the OS (`Io`, passed through untouched).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::kind::Kind;

#[derive(Debug, Error)]
pub enum RoadError {
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("{path} is a {found}, expected {expected}")]
    KindMismatch {
        path: PathBuf,
        expected: &'static str,
        found: Kind,
    },

    #[error("Unknown file mode {mode:#o}")]
    UnknownKind { mode: u32 },

    #[error("Handle is not mutable: {0}")]
    NotMutable(PathBuf),

    #[error("Operation not supported on {kind} {path}")]
    NotSupported { kind: Kind, path: PathBuf },

    #[error("Invalid entry name '{0}': must be a single path component")]
    InvalidName(String),

    #[error("Cannot copy {src} into its own subtree at {dest}")]
    IntoItself { src: PathBuf, dest: PathBuf },

    #[error("Watch failed: {0}")]
    Watch(#[from] notify::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RoadError {
    /// Stable short code for structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            RoadError::NotFound(_) => "not_found",
            RoadError::KindMismatch { .. } => "kind_mismatch",
            RoadError::UnknownKind { .. } => "unknown_kind",
            RoadError::NotMutable(_) => "not_mutable",
            RoadError::NotSupported { .. } => "not_supported",
            RoadError::InvalidName(_) => "invalid_name",
            RoadError::IntoItself { .. } => "into_itself",
            RoadError::Watch(_) => "watch",
            RoadError::Io(_) => "io",
        }
    }

    /// The underlying `io::ErrorKind` when this wraps an OS error.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            RoadError::Io(e) => Some(e.kind()),
            _ => None,
        }
    }

    /// Map an io error raised while touching `path`, turning NotFound into the typed variant.
    pub(crate) fn at(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> RoadError {
        let path = path.into();
        move |e: io::Error| {
            if e.kind() == io::ErrorKind::NotFound {
                RoadError::NotFound(path)
            } else {
                RoadError::Io(e)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RoadError>;
