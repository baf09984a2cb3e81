//! Core library for `road_fs`.
//!
//! Typed handles over filesystem entries. A path is classified from its raw
//! mode bits (without following a final symlink) into one of seven kinds, and
//! `Road::resolve` hands back the matching handle: `File`, `Folder`,
//! `SymbolicLink`, or `Special` for devices, FIFOs and sockets.
//!
//! Every handle carries a `mutable` flag that gates delete/move/copy/rename and
//! content writes before any OS call is made. Special nodes are never mutable.
//! Each operation comes in a blocking form and an `_async` form built on tokio.
//!
//! `TempFile` and `TempFolder` are handles that clean up after themselves.

pub mod access;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod kind;
pub mod output;
pub mod road;
pub mod shutdown;
pub mod temp;

mod platform;
mod watch;

pub use access::AccessMode;
pub use config::{LogLevel, Settings};
pub use errors::{Result, RoadError};
pub use kind::{Kind, classify, classify_async};
pub use road::{AsyncChunks, Chunks, File, Folder, Node, Road, Special, SymbolicLink};
pub use temp::{TempFile, TempFolder};

/// Convenient re-exports for typical usage.
///
/// ```no_run
/// use road_fs::prelude::*;
/// # fn demo() -> road_fs::Result<()> {
/// let dir = Folder::open("/tmp")?;
/// for entry in dir.list()? {
///     println!("{}\t{}", entry.kind(), entry.name());
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::{
        AccessMode, File, Folder, Kind, Road, RoadError, Settings, Special, SymbolicLink,
        TempFile, TempFolder,
    };
}
