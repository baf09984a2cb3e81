//! Path handles and the factory that mints them.
//!
//! `Road::resolve` classifies a path and returns the matching handle. Callers
//! that already know what they expect can open `File`, `Folder`,
//! `SymbolicLink` or `Special` directly and get a `KindMismatch` otherwise.

mod file;
mod folder;
mod node;
mod special;
mod symlink;

pub use file::{AsyncChunks, Chunks, File};
pub use folder::Folder;
pub use node::Node;
pub use special::Special;
pub use symlink::SymbolicLink;

use std::path::Path;
use tracing::debug;

use crate::errors::Result;
use crate::kind::{Kind, classify, classify_async};

/// A handle of whichever kind was found at a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Road {
    File(File),
    Folder(Folder),
    Symlink(SymbolicLink),
    Special(Special),
}

impl Road {
    /// Classify `path` and open the handle for its kind.
    pub fn resolve(path: impl AsRef<Path>) -> Result<Road> {
        let path = path.as_ref();
        let kind = classify(path)?;
        debug!(path = %path.display(), %kind, "resolving");
        match kind {
            Kind::RegularFile => File::open(path).map(Road::File),
            Kind::Directory => Folder::open(path).map(Road::Folder),
            Kind::SymbolicLink => SymbolicLink::open(path).map(Road::Symlink),
            Kind::BlockDevice | Kind::CharacterDevice | Kind::Fifo | Kind::Socket => {
                Special::open(path).map(Road::Special)
            }
        }
    }

    pub async fn resolve_async(path: impl AsRef<Path>) -> Result<Road> {
        let path = path.as_ref();
        let kind = classify_async(path).await?;
        debug!(path = %path.display(), %kind, "resolving");
        match kind {
            Kind::RegularFile => File::open_async(path).await.map(Road::File),
            Kind::Directory => Folder::open_async(path).await.map(Road::Folder),
            Kind::SymbolicLink => SymbolicLink::open_async(path).await.map(Road::Symlink),
            Kind::BlockDevice | Kind::CharacterDevice | Kind::Fifo | Kind::Socket => {
                Special::open_async(path).await.map(Road::Special)
            }
        }
    }

    pub fn node(&self) -> &Node {
        match self {
            Road::File(h) => h.node(),
            Road::Folder(h) => h.node(),
            Road::Symlink(h) => h.node(),
            Road::Special(h) => h.node(),
        }
    }

    pub fn kind(&self) -> Kind {
        self.node().kind()
    }

    pub fn location(&self) -> &Path {
        self.node().location()
    }

    pub fn name(&self) -> String {
        self.node().name()
    }

    /// No-op for special nodes, which never become mutable.
    pub fn set_mutable(&mut self, mutable: bool) {
        match self {
            Road::File(h) => h.set_mutable(mutable),
            Road::Folder(h) => h.set_mutable(mutable),
            Road::Symlink(h) => h.set_mutable(mutable),
            Road::Special(_) => {}
        }
    }

    pub fn delete(&self) -> Result<()> {
        match self {
            Road::File(h) => h.delete(),
            Road::Folder(h) => h.delete(),
            Road::Symlink(h) => h.delete(),
            Road::Special(h) => h.delete(),
        }
    }

    pub async fn delete_async(&self) -> Result<()> {
        match self {
            Road::File(h) => h.delete_async().await,
            Road::Folder(h) => h.delete_async().await,
            Road::Symlink(h) => h.delete_async().await,
            Road::Special(h) => h.delete_async().await,
        }
    }

    pub fn move_into(&mut self, dir: &Folder) -> Result<()> {
        match self {
            Road::File(h) => h.move_into(dir),
            Road::Folder(h) => h.move_into(dir),
            Road::Symlink(h) => h.move_into(dir),
            Road::Special(h) => h.move_into(dir),
        }
    }

    pub async fn move_into_async(&mut self, dir: &Folder) -> Result<()> {
        match self {
            Road::File(h) => h.move_into_async(dir).await,
            Road::Folder(h) => h.move_into_async(dir).await,
            Road::Symlink(h) => h.move_into_async(dir).await,
            Road::Special(h) => h.move_into_async(dir).await,
        }
    }

    pub fn copy_into(&self, dir: &Folder) -> Result<Road> {
        match self {
            Road::File(h) => h.copy_into(dir).map(Road::File),
            Road::Folder(h) => h.copy_into(dir).map(Road::Folder),
            Road::Symlink(h) => h.copy_into(dir).map(Road::Symlink),
            Road::Special(h) => h.copy_into(dir).map(Road::Special),
        }
    }

    pub async fn copy_into_async(&self, dir: &Folder) -> Result<Road> {
        match self {
            Road::File(h) => h.copy_into_async(dir).await.map(Road::File),
            Road::Folder(h) => h.copy_into_async(dir).await.map(Road::Folder),
            Road::Symlink(h) => h.copy_into_async(dir).await.map(Road::Symlink),
            Road::Special(h) => h.copy_into_async(dir).await.map(Road::Special),
        }
    }

    pub fn rename(&mut self, new_name: &str) -> Result<()> {
        match self {
            Road::File(h) => h.rename(new_name),
            Road::Folder(h) => h.rename(new_name),
            Road::Symlink(h) => h.rename(new_name),
            Road::Special(h) => h.rename(new_name),
        }
    }

    pub async fn rename_async(&mut self, new_name: &str) -> Result<()> {
        match self {
            Road::File(h) => h.rename_async(new_name).await,
            Road::Folder(h) => h.rename_async(new_name).await,
            Road::Symlink(h) => h.rename_async(new_name).await,
            Road::Special(h) => h.rename_async(new_name).await,
        }
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            Road::File(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Road::Folder(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_symlink(&self) -> Option<&SymbolicLink> {
        match self {
            Road::Symlink(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_special(&self) -> Option<&Special> {
        match self {
            Road::Special(h) => Some(h),
            _ => None,
        }
    }

    pub fn into_file(self) -> Option<File> {
        match self {
            Road::File(h) => Some(h),
            _ => None,
        }
    }

    pub fn into_folder(self) -> Option<Folder> {
        match self {
            Road::Folder(h) => Some(h),
            _ => None,
        }
    }

    pub fn into_symlink(self) -> Option<SymbolicLink> {
        match self {
            Road::Symlink(h) => Some(h),
            _ => None,
        }
    }
}

impl std::ops::Deref for Road {
    type Target = Node;
    fn deref(&self) -> &Node {
        self.node()
    }
}

impl From<File> for Road {
    fn from(h: File) -> Road {
        Road::File(h)
    }
}

impl From<Folder> for Road {
    fn from(h: Folder) -> Road {
        Road::Folder(h)
    }
}

impl From<SymbolicLink> for Road {
    fn from(h: SymbolicLink) -> Road {
        Road::Symlink(h)
    }
}

impl From<Special> for Road {
    fn from(h: Special) -> Road {
        Road::Special(h)
    }
}
