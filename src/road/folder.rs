//! Directory handle: one-level listing and lookup through the factory,
//! recursive delete, and copy-merge.

use std::fs;
use std::io;
use std::ops::Deref;
use std::path::Path;
use tracing::{debug, info};

use super::node::{Expect, Node};
use super::Road;
use crate::errors::{Result, RoadError};
use crate::fs_ops::{copy_tree, move_tree_across, single_component};
use crate::kind::Kind;

/// Handle to a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    node: Node,
}

impl Deref for Folder {
    type Target = Node;
    fn deref(&self) -> &Node {
        &self.node
    }
}

fn wanted(kinds: &[Kind], road: &Road) -> bool {
    kinds.is_empty() || kinds.contains(&road.kind())
}

impl Folder {
    pub fn open(path: impl AsRef<Path>) -> Result<Folder> {
        Node::open(path.as_ref(), Expect::Exactly(Kind::Directory)).map(Folder::from_node)
    }

    pub async fn open_async(path: impl AsRef<Path>) -> Result<Folder> {
        Node::open_async(path.as_ref(), Expect::Exactly(Kind::Directory))
            .await
            .map(Folder::from_node)
    }

    /// Create the directory and any missing parents, then open it.
    pub fn create(path: impl AsRef<Path>) -> Result<Folder> {
        let path = path.as_ref();
        fs::create_dir_all(path)?;
        Folder::open(path)
    }

    pub async fn create_async(path: impl AsRef<Path>) -> Result<Folder> {
        let path = path.as_ref();
        tokio::fs::create_dir_all(path).await?;
        Folder::open_async(path).await
    }

    pub(crate) fn from_node(node: Node) -> Folder {
        Folder { node }
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

    /// Direct children, each classified through the factory. Order is whatever the OS reports.
    pub fn list(&self) -> Result<Vec<Road>> {
        self.list_kinds(&[])
    }

    /// Direct children whose kind is one of `kinds` (all of them when `kinds` is empty).
    pub fn list_kinds(&self, kinds: &[Kind]) -> Result<Vec<Road>> {
        self.verify()?;
        let mut out = Vec::new();
        for entry in fs::read_dir(self.path()).map_err(RoadError::at(self.path()))? {
            let entry = entry?;
            match Road::resolve(entry.path()) {
                Ok(road) if wanted(kinds, &road) => out.push(road),
                Ok(_) => {}
                // Removed between readdir and classification.
                Err(RoadError::NotFound(p)) => debug!(path = %p.display(), "entry vanished while listing"),
                Err(e) => return Err(e),
            }
        }
        Ok(out)
    }

    pub async fn list_async(&self) -> Result<Vec<Road>> {
        self.list_kinds_async(&[]).await
    }

    pub async fn list_kinds_async(&self, kinds: &[Kind]) -> Result<Vec<Road>> {
        self.verify_async().await?;
        let mut out = Vec::new();
        let mut rd = tokio::fs::read_dir(self.path())
            .await
            .map_err(RoadError::at(self.path()))?;
        while let Some(entry) = rd.next_entry().await? {
            match Road::resolve_async(entry.path()).await {
                Ok(road) if wanted(kinds, &road) => out.push(road),
                Ok(_) => {}
                Err(RoadError::NotFound(p)) => debug!(path = %p.display(), "entry vanished while listing"),
                Err(e) => return Err(e),
            }
        }
        Ok(out)
    }

    /// The direct child called `name`, if any. Nested names are rejected.
    pub fn find(&self, name: &str) -> Result<Option<Road>> {
        self.find_kinds(name, &[])
    }

    pub fn find_kinds(&self, name: &str, kinds: &[Kind]) -> Result<Option<Road>> {
        let name = single_component(name)?;
        self.verify()?;
        match Road::resolve(self.path().join(name)) {
            Ok(road) if wanted(kinds, &road) => Ok(Some(road)),
            Ok(_) | Err(RoadError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn find_async(&self, name: &str) -> Result<Option<Road>> {
        self.find_kinds_async(name, &[]).await
    }

    pub async fn find_kinds_async(&self, name: &str, kinds: &[Kind]) -> Result<Option<Road>> {
        let name = single_component(name)?;
        self.verify_async().await?;
        match Road::resolve_async(self.path().join(name)).await {
            Ok(road) if wanted(kinds, &road) => Ok(Some(road)),
            Ok(_) | Err(RoadError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Like [`Folder::find`] but a missing child is an error.
    pub fn get(&self, name: &str) -> Result<Road> {
        self.find(name)?
            .ok_or_else(|| RoadError::NotFound(self.path().join(name)))
    }

    pub async fn get_async(&self, name: &str) -> Result<Road> {
        self.find_async(name)
            .await?
            .ok_or_else(|| RoadError::NotFound(self.path().join(name)))
    }

    /// Remove the directory and everything under it.
    pub fn delete(&self) -> Result<()> {
        self.assert_mutable()?;
        fs::remove_dir_all(self.path()).map_err(RoadError::at(self.path()))?;
        info!(path = %self.path().display(), "deleted directory");
        Ok(())
    }

    pub async fn delete_async(&self) -> Result<()> {
        self.assert_mutable()?;
        tokio::fs::remove_dir_all(self.path())
            .await
            .map_err(RoadError::at(self.path()))?;
        info!(path = %self.path().display(), "deleted directory");
        Ok(())
    }

    pub fn move_into(&mut self, dir: &Folder) -> Result<()> {
        self.assert_mutable()?;
        let dest = self.node.destination_in(dir)?;
        self.node.relocate(dest, move_tree_across)
    }

    pub async fn move_into_async(&mut self, dir: &Folder) -> Result<()> {
        self.assert_mutable()?;
        let dest = self.node.destination_in(dir)?;
        self.node.relocate_async(dest, move_tree_across).await
    }

    /// Recursively copy into `dir/<name>`, merging with an existing directory there.
    /// Copying into its own parent is a no-op; copying into its own subtree fails
    /// with `IntoItself` and leaves the disk untouched.
    pub fn copy_into(&self, dir: &Folder) -> Result<Folder> {
        self.assert_mutable()?;
        let dest = self.node.destination_in(dir)?;
        let files = copy_tree(self.path(), &dest)?;
        info!(src = %self.path().display(), dest = %dest.display(), files, "copied directory");
        Folder::open(dest)
    }

    pub async fn copy_into_async(&self, dir: &Folder) -> Result<Folder> {
        self.assert_mutable()?;
        let dest = self.node.destination_in(dir)?;
        let (src, to) = (self.path().to_path_buf(), dest.clone());
        let files = tokio::task::spawn_blocking(move || copy_tree(&src, &to))
            .await
            .map_err(io::Error::other)??;
        info!(src = %self.path().display(), dest = %dest.display(), files, "copied directory");
        Folder::open_async(dest).await
    }

    pub fn rename(&mut self, new_name: &str) -> Result<()> {
        self.assert_mutable()?;
        let dest = self.node.sibling(new_name)?;
        self.node.relocate(dest, move_tree_across)
    }

    pub async fn rename_async(&mut self, new_name: &str) -> Result<()> {
        self.assert_mutable()?;
        let dest = self.node.sibling(new_name)?;
        self.node.relocate_async(dest, move_tree_across).await
    }
}
