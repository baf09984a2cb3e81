//! Symbolic link handle. Every mutation acts on the link entry, never on its target.

use std::fs;
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::node::{Expect, Node, resolve_location, resolve_location_async};
use super::{Folder, Road};
use crate::errors::{Result, RoadError};
use crate::fs_ops::relink;
use crate::kind::Kind;
use crate::platform;

/// Handle to a symbolic link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolicLink {
    node: Node,
}

impl Deref for SymbolicLink {
    type Target = Node;
    fn deref(&self) -> &Node {
        &self.node
    }
}

/// Recreate `src` at `dest` pointing at the same absolute target, then drop `src`.
fn move_link_across(src: &Path, dest: &Path) -> Result<()> {
    let target = absolute_target(src, &fs::read_link(src)?);
    relink(&target, dest)?;
    fs::remove_file(src).map_err(RoadError::at(src))?;
    Ok(())
}

/// A stored target interpreted relative to the link's own directory.
fn absolute_target(link: &Path, raw: &Path) -> PathBuf {
    if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        link.parent().unwrap_or(link).join(raw)
    }
}

impl SymbolicLink {
    pub fn open(path: impl AsRef<Path>) -> Result<SymbolicLink> {
        Node::open(path.as_ref(), Expect::Exactly(Kind::SymbolicLink)).map(SymbolicLink::from_node)
    }

    pub async fn open_async(path: impl AsRef<Path>) -> Result<SymbolicLink> {
        Node::open_async(path.as_ref(), Expect::Exactly(Kind::SymbolicLink))
            .await
            .map(SymbolicLink::from_node)
    }

    /// Create a link at `path` if nothing is there, then open it.
    ///
    /// With no target the link stores an empty path, a deliberate placeholder.
    /// Some platforms (Linux among them) refuse empty targets; that OS error is returned as-is.
    pub fn create(path: impl AsRef<Path>, target: Option<&Path>) -> Result<SymbolicLink> {
        let path = path.as_ref();
        match fs::symlink_metadata(path) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let target = target.unwrap_or(Path::new(""));
                platform::symlink(target, path)?;
                debug!(path = %path.display(), target = %target.display(), "created symlink");
            }
            Err(e) => return Err(e.into()),
        }
        SymbolicLink::open(path)
    }

    pub async fn create_async(path: impl AsRef<Path>, target: Option<&Path>) -> Result<SymbolicLink> {
        let path = path.as_ref();
        match tokio::fs::symlink_metadata(path).await {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let target = target.unwrap_or(Path::new(""));
                platform::symlink_async(target, path).await?;
                debug!(path = %path.display(), target = %target.display(), "created symlink");
            }
            Err(e) => return Err(e.into()),
        }
        SymbolicLink::open_async(path).await
    }

    pub(crate) fn from_node(node: Node) -> SymbolicLink {
        SymbolicLink { node }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn set_mutable(&mut self, mutable: bool) {
        self.node.set_mutable_flag(mutable);
    }

    fn path(&self) -> &Path {
        self.node.location()
    }

    /// The target exactly as stored in the link.
    pub fn link_target(&self) -> Result<PathBuf> {
        fs::read_link(self.path()).map_err(RoadError::at(self.path()))
    }

    pub async fn link_target_async(&self) -> Result<PathBuf> {
        tokio::fs::read_link(self.path())
            .await
            .map_err(RoadError::at(self.path()))
    }

    /// Absolute location the link points at, without requiring it to exist.
    pub fn resolved_target(&self) -> Result<PathBuf> {
        let raw = absolute_target(self.path(), &self.link_target()?);
        Ok(resolve_location(&raw).unwrap_or(raw))
    }

    pub async fn resolved_target_async(&self) -> Result<PathBuf> {
        let raw = absolute_target(self.path(), &self.link_target_async().await?);
        Ok(resolve_location_async(&raw).await.unwrap_or(raw))
    }

    /// Handle for whatever the link points at.
    pub fn target(&self) -> Result<Road> {
        Road::resolve(self.resolved_target()?)
    }

    pub async fn target_async(&self) -> Result<Road> {
        Road::resolve_async(self.resolved_target_async().await?).await
    }

    /// Point the link somewhere else.
    ///
    /// This is a delete followed by a create: two OS calls, not atomic. A crash
    /// between them leaves no link at this location.
    pub fn retarget(&self, new_target: &Path) -> Result<()> {
        self.assert_mutable()?;
        fs::remove_file(self.path()).map_err(RoadError::at(self.path()))?;
        platform::symlink(new_target, self.path())?;
        info!(path = %self.path().display(), target = %new_target.display(), "retargeted symlink");
        Ok(())
    }

    pub async fn retarget_async(&self, new_target: &Path) -> Result<()> {
        self.assert_mutable()?;
        tokio::fs::remove_file(self.path())
            .await
            .map_err(RoadError::at(self.path()))?;
        platform::symlink_async(new_target, self.path()).await?;
        info!(path = %self.path().display(), target = %new_target.display(), "retargeted symlink");
        Ok(())
    }

    /// Remove the link itself.
    pub fn delete(&self) -> Result<()> {
        self.assert_mutable()?;
        fs::remove_file(self.path()).map_err(RoadError::at(self.path()))?;
        info!(path = %self.path().display(), "deleted symlink");
        Ok(())
    }

    pub async fn delete_async(&self) -> Result<()> {
        self.assert_mutable()?;
        tokio::fs::remove_file(self.path())
            .await
            .map_err(RoadError::at(self.path()))?;
        info!(path = %self.path().display(), "deleted symlink");
        Ok(())
    }

    pub fn move_into(&mut self, dir: &Folder) -> Result<()> {
        self.assert_mutable()?;
        let dest = self.node.destination_in(dir)?;
        self.node.relocate(dest, move_link_across)
    }

    pub async fn move_into_async(&mut self, dir: &Folder) -> Result<()> {
        self.assert_mutable()?;
        let dest = self.node.destination_in(dir)?;
        self.node.relocate_async(dest, move_link_across).await
    }

    /// New link in `dir` pointing at this link's resolved target.
    /// Copying into the link's own folder leaves it as it is.
    pub fn copy_into(&self, dir: &Folder) -> Result<SymbolicLink> {
        self.assert_mutable()?;
        let dest = self.node.destination_in(dir)?;
        if dest == self.location() {
            return SymbolicLink::open(dest);
        }
        let target = self.resolved_target()?;
        relink(&target, &dest)?;
        info!(src = %self.path().display(), dest = %dest.display(), target = %target.display(), "copied symlink");
        SymbolicLink::open(dest)
    }

    pub async fn copy_into_async(&self, dir: &Folder) -> Result<SymbolicLink> {
        self.assert_mutable()?;
        let dest = self.node.destination_in(dir)?;
        if dest == self.location() {
            return SymbolicLink::open_async(dest).await;
        }
        let target = self.resolved_target_async().await?;
        let (raw, to) = (target.clone(), dest.clone());
        tokio::task::spawn_blocking(move || relink(&raw, &to))
            .await
            .map_err(io::Error::other)??;
        info!(src = %self.path().display(), dest = %dest.display(), target = %target.display(), "copied symlink");
        SymbolicLink::open_async(dest).await
    }

    pub fn rename(&mut self, new_name: &str) -> Result<()> {
        self.assert_mutable()?;
        let dest = self.node.sibling(new_name)?;
        self.node.relocate(dest, move_link_across)
    }

    pub async fn rename_async(&mut self, new_name: &str) -> Result<()> {
        self.assert_mutable()?;
        let dest = self.node.sibling(new_name)?;
        self.node.relocate_async(dest, move_link_across).await
    }
}
