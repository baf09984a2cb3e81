//! Handle for block/char devices, FIFOs and sockets.
//!
//! These are observed, never changed: the handle is never mutable and every
//! mutation is refused with `NotSupported` before touching the disk.

use std::ops::Deref;
use std::path::Path;

use super::Folder;
use super::node::{Expect, Node};
use crate::errors::{Result, RoadError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Special {
    node: Node,
}

impl Deref for Special {
    type Target = Node;
    fn deref(&self) -> &Node {
        &self.node
    }
}

impl Special {
    pub fn open(path: impl AsRef<Path>) -> Result<Special> {
        Node::open(path.as_ref(), Expect::Unusable).map(Special::from_node)
    }

    pub async fn open_async(path: impl AsRef<Path>) -> Result<Special> {
        Node::open_async(path.as_ref(), Expect::Unusable)
            .await
            .map(Special::from_node)
    }

    pub(crate) fn from_node(node: Node) -> Special {
        Special { node }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    fn refuse<T>(&self) -> Result<T> {
        Err(RoadError::NotSupported {
            kind: self.node.kind(),
            path: self.node.location().to_path_buf(),
        })
    }

    pub fn delete(&self) -> Result<()> {
        self.refuse()
    }

    pub async fn delete_async(&self) -> Result<()> {
        self.refuse()
    }

    pub fn move_into(&mut self, _dir: &Folder) -> Result<()> {
        self.refuse()
    }

    pub async fn move_into_async(&mut self, _dir: &Folder) -> Result<()> {
        self.refuse()
    }

    pub fn copy_into(&self, _dir: &Folder) -> Result<Special> {
        self.refuse()
    }

    pub async fn copy_into_async(&self, _dir: &Folder) -> Result<Special> {
        self.refuse()
    }

    pub fn rename(&mut self, _new_name: &str) -> Result<()> {
        self.refuse()
    }

    pub async fn rename_async(&mut self, _new_name: &str) -> Result<()> {
        self.refuse()
    }
}
