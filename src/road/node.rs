//! The state every handle shares: resolved location, kind, and the mutable flag,
//! plus the kind-independent queries (existence, metadata, path algebra, access).

use std::fs::{self, Metadata};
use std::io;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use std::time::SystemTime;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::access::{self, AccessMode};
use crate::errors::{Result, RoadError};
use crate::fs_ops::{is_cross_device, single_component};
use crate::kind::{Kind, classify, classify_async};
use crate::road::Folder;
use crate::watch;

/// Copy+remove strategy used when a rename crosses filesystems.
pub(crate) type CrossDevice = fn(&Path, &Path) -> Result<()>;

/// What a constructor is willing to accept at a path.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Expect {
    Exactly(Kind),
    Unusable,
}

impl Expect {
    fn accepts(self, kind: Kind) -> bool {
        match self {
            Expect::Exactly(k) => k == kind,
            Expect::Unusable => kind.is_unusable(),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Expect::Exactly(k) => k.label(),
            Expect::Unusable => "device, FIFO or socket",
        }
    }
}

/// Resolve `path` to an absolute location: the parent is canonicalized,
/// the final component is kept as-is so a link stays a link.
pub(crate) fn resolve_location(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => Ok(dunce::canonicalize(parent)?.join(name)),
        _ => dunce::canonicalize(&absolute),
    }
}

pub(crate) async fn resolve_location_async(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let resolved = match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => tokio::fs::canonicalize(parent).await?.join(name),
        _ => tokio::fs::canonicalize(&absolute).await?,
    };
    Ok(dunce::simplified(&resolved).to_path_buf())
}

/// Location, kind and mutability of one filesystem entry.
///
/// A node does not own or lock the entry. Two nodes may point at the same path,
/// and external changes are only noticed by re-querying.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    location: PathBuf,
    kind: Kind,
    mutable: bool,
}

impl Node {
    pub(crate) fn open(path: &Path, expect: Expect) -> Result<Node> {
        let location = resolve_location(path).map_err(RoadError::at(path))?;
        let kind = classify(&location)?;
        Self::checked(location, kind, expect)
    }

    pub(crate) async fn open_async(path: &Path, expect: Expect) -> Result<Node> {
        let location = resolve_location_async(path)
            .await
            .map_err(RoadError::at(path))?;
        let kind = classify_async(&location).await?;
        Self::checked(location, kind, expect)
    }

    fn checked(location: PathBuf, kind: Kind, expect: Expect) -> Result<Node> {
        if !expect.accepts(kind) {
            return Err(RoadError::KindMismatch {
                path: location,
                expected: expect.label(),
                found: kind,
            });
        }
        debug!(path = %location.display(), %kind, "opened handle");
        Ok(Node {
            location,
            kind,
            mutable: !kind.is_unusable(),
        })
    }

    /// A node for a location that is not checked against the disk.
    pub(crate) fn unchecked(location: PathBuf, kind: Kind) -> Node {
        Node {
            location,
            kind,
            mutable: !kind.is_unusable(),
        }
    }

    pub(crate) fn set_mutable_flag(&mut self, mutable: bool) {
        self.mutable = mutable && !self.kind.is_unusable();
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    /// True iff the path still exists and still classifies as this node's kind.
    pub fn exists(&self) -> bool {
        matches!(classify(&self.location), Ok(k) if k == self.kind)
    }

    pub async fn exists_async(&self) -> bool {
        matches!(classify_async(&self.location).await, Ok(k) if k == self.kind)
    }

    /// Fail unless the entry is still there with the same kind.
    pub fn verify(&self) -> Result<()> {
        self.compare(classify(&self.location)?)
    }

    pub async fn verify_async(&self) -> Result<()> {
        self.compare(classify_async(&self.location).await?)
    }

    fn compare(&self, found: Kind) -> Result<()> {
        if found != self.kind {
            return Err(RoadError::KindMismatch {
                path: self.location.clone(),
                expected: self.kind.label(),
                found,
            });
        }
        Ok(())
    }

    /// lstat metadata.
    pub fn stat(&self) -> Result<Metadata> {
        fs::symlink_metadata(&self.location).map_err(RoadError::at(&self.location))
    }

    pub async fn stat_async(&self) -> Result<Metadata> {
        tokio::fs::symlink_metadata(&self.location)
            .await
            .map_err(RoadError::at(&self.location))
    }

    pub fn modified_time(&self) -> Result<SystemTime> {
        Ok(self.stat()?.modified()?)
    }

    pub async fn modified_time_async(&self) -> Result<SystemTime> {
        Ok(self.stat_async().await?.modified()?)
    }

    pub fn created_time(&self) -> Result<SystemTime> {
        Ok(self.stat()?.created()?)
    }

    pub async fn created_time_async(&self) -> Result<SystemTime> {
        Ok(self.stat_async().await?.created()?)
    }

    /// Number of path separators in the location.
    pub fn depth(&self) -> usize {
        self.location
            .to_string_lossy()
            .matches(MAIN_SEPARATOR)
            .count()
    }

    /// Basename of the location; empty for the root.
    pub fn name(&self) -> String {
        self.location
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Handle for the containing directory. Computed from the location only;
    /// the directory is not required to exist. The root is its own parent.
    pub fn parent(&self) -> Folder {
        let dir = self.location.parent().unwrap_or(&self.location);
        Folder::from_node(Node::unchecked(dir.to_path_buf(), Kind::Directory))
    }

    /// Parents from nearest to farthest, stopping before the root
    /// (the directory that is its own parent).
    pub fn ancestors(&self) -> Vec<Folder> {
        let mut out = Vec::new();
        let mut current = self.parent();
        loop {
            let next = current.parent();
            if next.location() == current.location() {
                break;
            }
            out.push(current);
            current = next;
        }
        out
    }

    /// Probe OS access. Missing and permission-denied read as `false`.
    pub fn accessible(&self, mode: AccessMode) -> Result<bool> {
        access::accessible(&self.location, mode)
    }

    pub async fn accessible_async(&self, mode: AccessMode) -> Result<bool> {
        access::accessible_async(&self.location, mode).await
    }

    /// Wait until `accessible(mode)` holds, rechecking after each burst of change
    /// notifications. `on_attempt` runs once per failed recheck.
    /// Resolves `true` once accessible and `false` if `token` is cancelled first.
    pub async fn until_accessible<F: FnMut()>(
        &self,
        mode: AccessMode,
        token: &CancellationToken,
        on_attempt: F,
    ) -> Result<bool> {
        watch::until_accessible(self, mode, token, on_attempt).await
    }

    /// Invoke `on_change` for each burst of change notifications until `token` is cancelled.
    pub async fn on_change<F: FnMut(&notify::Event)>(
        &self,
        token: &CancellationToken,
        on_change: F,
    ) -> Result<()> {
        watch::on_change(self, token, on_change).await
    }

    pub fn assert_mutable(&self) -> Result<()> {
        if !self.mutable {
            return Err(RoadError::NotMutable(self.location.clone()));
        }
        Ok(())
    }

    /// `dir/<name>` for moves and copies.
    pub(crate) fn destination_in(&self, dir: &Folder) -> Result<PathBuf> {
        let name = self
            .location
            .file_name()
            .ok_or_else(|| RoadError::InvalidName(self.location.display().to_string()))?;
        Ok(dir.location().join(name))
    }

    /// `<parent>/<new_name>` for renames.
    pub(crate) fn sibling(&self, new_name: &str) -> Result<PathBuf> {
        let name = single_component(new_name)?;
        let parent = self.location.parent().unwrap_or(&self.location);
        Ok(parent.join(name))
    }

    /// Rename the entry to `dest` and track it. EXDEV falls back to `across`.
    pub(crate) fn relocate(&mut self, dest: PathBuf, across: CrossDevice) -> Result<()> {
        match fs::rename(&self.location, &dest) {
            Ok(()) => {}
            Err(e) if is_cross_device(&e) => {
                warn!(src = %self.location.display(), dest = %dest.display(), "rename crosses devices, copying instead");
                across(&self.location, &dest)?;
            }
            Err(e) => return Err(RoadError::at(&self.location)(e)),
        }
        info!(src = %self.location.display(), dest = %dest.display(), kind = %self.kind, "moved");
        self.location = dest;
        Ok(())
    }

    pub(crate) async fn relocate_async(&mut self, dest: PathBuf, across: CrossDevice) -> Result<()> {
        match tokio::fs::rename(&self.location, &dest).await {
            Ok(()) => {}
            Err(e) if is_cross_device(&e) => {
                warn!(src = %self.location.display(), dest = %dest.display(), "rename crosses devices, copying instead");
                let (src, to) = (self.location.clone(), dest.clone());
                tokio::task::spawn_blocking(move || across(&src, &to))
                    .await
                    .map_err(io::Error::other)??;
            }
            Err(e) => return Err(RoadError::at(&self.location)(e)),
        }
        info!(src = %self.location.display(), dest = %dest.display(), kind = %self.kind, "moved");
        self.location = dest;
        Ok(())
    }
}
