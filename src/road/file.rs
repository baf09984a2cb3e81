//! Regular file handle: text/binary I/O, line and chunk iteration, raw streams,
//! content comparison, and the file flavour of delete/move/copy/rename.

use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::ops::Deref;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info};

use super::node::{Expect, Node};
use super::Folder;
use crate::config::Settings;
use crate::errors::{Result, RoadError};
use crate::fs_ops::{copy_file, move_file_across};
use crate::kind::Kind;

/// Chunk size used by `same_as` when streaming both files.
const COMPARE_CHUNK: usize = 64 * 1024;

/// Handle to a regular file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    node: Node,
}

impl Deref for File {
    type Target = Node;
    fn deref(&self) -> &Node {
        &self.node
    }
}

impl File {
    /// Open a handle on an existing regular file.
    pub fn open(path: impl AsRef<Path>) -> Result<File> {
        Node::open(path.as_ref(), Expect::Exactly(Kind::RegularFile)).map(File::from_node)
    }

    pub async fn open_async(path: impl AsRef<Path>) -> Result<File> {
        Node::open_async(path.as_ref(), Expect::Exactly(Kind::RegularFile))
            .await
            .map(File::from_node)
    }

    /// Create an empty file if nothing is at `path`, then open it.
    /// An existing file is left untouched.
    pub fn create(path: impl AsRef<Path>) -> Result<File> {
        let path = path.as_ref();
        match fs::symlink_metadata(path) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                match OpenOptions::new().write(true).create_new(true).open(path) {
                    Ok(_) => debug!(path = %path.display(), "created empty file"),
                    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                    Err(e) => return Err(e.into()),
                }
            }
            Err(e) => return Err(e.into()),
        }
        File::open(path)
    }

    pub async fn create_async(path: impl AsRef<Path>) -> Result<File> {
        let path = path.as_ref();
        match tokio::fs::symlink_metadata(path).await {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let created = tokio::fs::OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(path)
                    .await;
                match created {
                    Ok(_) => debug!(path = %path.display(), "created empty file"),
                    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                    Err(e) => return Err(e.into()),
                }
            }
            Err(e) => return Err(e.into()),
        }
        File::open_async(path).await
    }

    pub(crate) fn from_node(node: Node) -> File {
        File { node }
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

    /// Extension without the dot.
    pub fn extension(&self) -> Option<String> {
        self.path()
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
    }

    /// Size in bytes.
    pub fn size(&self) -> Result<u64> {
        Ok(self.stat()?.len())
    }

    pub async fn size_async(&self) -> Result<u64> {
        Ok(self.stat_async().await?.len())
    }

    // ---- text ----

    pub fn read_text(&self) -> Result<String> {
        fs::read_to_string(self.path()).map_err(RoadError::at(self.path()))
    }

    pub async fn read_text_async(&self) -> Result<String> {
        tokio::fs::read_to_string(self.path())
            .await
            .map_err(RoadError::at(self.path()))
    }

    pub fn write_text(&self, text: &str) -> Result<()> {
        self.write_bytes(text.as_bytes())
    }

    pub async fn write_text_async(&self, text: &str) -> Result<()> {
        self.write_bytes_async(text.as_bytes()).await
    }

    pub fn append_text(&self, text: &str) -> Result<()> {
        self.append_bytes(text.as_bytes())
    }

    pub async fn append_text_async(&self, text: &str) -> Result<()> {
        self.append_bytes_async(text.as_bytes()).await
    }

    // ---- binary ----

    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        fs::read(self.path()).map_err(RoadError::at(self.path()))
    }

    pub async fn read_bytes_async(&self) -> Result<Vec<u8>> {
        tokio::fs::read(self.path())
            .await
            .map_err(RoadError::at(self.path()))
    }

    /// Replace the contents.
    pub fn write_bytes(&self, data: &[u8]) -> Result<()> {
        let mut f = self.write_stream()?;
        f.write_all(data)?;
        Ok(())
    }

    pub async fn write_bytes_async(&self, data: &[u8]) -> Result<()> {
        let mut f = self.write_stream_async().await?;
        f.write_all(data).await?;
        f.flush().await?;
        Ok(())
    }

    pub fn append_bytes(&self, data: &[u8]) -> Result<()> {
        let mut f = self.append_stream()?;
        f.write_all(data)?;
        Ok(())
    }

    pub async fn append_bytes_async(&self, data: &[u8]) -> Result<()> {
        let mut f = self.append_stream_async().await?;
        f.write_all(data).await?;
        f.flush().await?;
        Ok(())
    }

    // ---- streams ----

    pub fn read_stream(&self) -> Result<fs::File> {
        fs::File::open(self.path()).map_err(RoadError::at(self.path()))
    }

    pub async fn read_stream_async(&self) -> Result<tokio::fs::File> {
        tokio::fs::File::open(self.path())
            .await
            .map_err(RoadError::at(self.path()))
    }

    /// Truncating writer. The file must still exist; this never creates it.
    pub fn write_stream(&self) -> Result<fs::File> {
        self.assert_mutable()?;
        OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(self.path())
            .map_err(RoadError::at(self.path()))
    }

    pub async fn write_stream_async(&self) -> Result<tokio::fs::File> {
        self.assert_mutable()?;
        tokio::fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(self.path())
            .await
            .map_err(RoadError::at(self.path()))
    }

    pub fn append_stream(&self) -> Result<fs::File> {
        self.assert_mutable()?;
        OpenOptions::new()
            .append(true)
            .open(self.path())
            .map_err(RoadError::at(self.path()))
    }

    pub async fn append_stream_async(&self) -> Result<tokio::fs::File> {
        self.assert_mutable()?;
        tokio::fs::OpenOptions::new()
            .append(true)
            .open(self.path())
            .await
            .map_err(RoadError::at(self.path()))
    }

    // ---- iteration ----

    /// Lines of the file; every call opens a fresh reader.
    pub fn lines(&self) -> Result<io::Lines<BufReader<fs::File>>> {
        Ok(BufReader::new(self.read_stream()?).lines())
    }

    pub async fn lines_async(&self) -> Result<tokio::io::Lines<tokio::io::BufReader<tokio::fs::File>>> {
        Ok(tokio::io::BufReader::new(self.read_stream_async().await?).lines())
    }

    /// Chunks of the configured default size.
    pub fn chunks(&self) -> Result<Chunks> {
        self.chunks_of(Settings::global().chunk_size)
    }

    /// Chunks of `size` bytes; only the last one may be shorter.
    pub fn chunks_of(&self, size: usize) -> Result<Chunks> {
        Ok(Chunks {
            reader: self.read_stream()?,
            size: size.max(1),
            done: false,
        })
    }

    pub async fn chunks_async(&self) -> Result<AsyncChunks> {
        self.chunks_of_async(Settings::global().chunk_size).await
    }

    pub async fn chunks_of_async(&self, size: usize) -> Result<AsyncChunks> {
        Ok(AsyncChunks {
            reader: self.read_stream_async().await?,
            size: size.max(1),
            done: false,
        })
    }

    /// Byte-for-byte equality with another file.
    ///
    /// A handle compared with a handle on the same resolved path is `false`:
    /// comparing a file with itself is treated as a caller mistake, not a match.
    pub fn same_as(&self, other: &File) -> Result<bool> {
        if self.path() == other.path() {
            return Ok(false);
        }
        if self.size()? != other.size()? {
            return Ok(false);
        }
        let mut left = self.chunks_of(COMPARE_CHUNK)?;
        let mut right = other.chunks_of(COMPARE_CHUNK)?;
        loop {
            match (left.next().transpose()?, right.next().transpose()?) {
                (None, None) => return Ok(true),
                (Some(a), Some(b)) if a == b => {}
                _ => return Ok(false),
            }
        }
    }

    pub async fn same_as_async(&self, other: &File) -> Result<bool> {
        if self.path() == other.path() {
            return Ok(false);
        }
        if self.size_async().await? != other.size_async().await? {
            return Ok(false);
        }
        let mut left = self.chunks_of_async(COMPARE_CHUNK).await?;
        let mut right = other.chunks_of_async(COMPARE_CHUNK).await?;
        loop {
            match (left.next_chunk().await?, right.next_chunk().await?) {
                (None, None) => return Ok(true),
                (Some(a), Some(b)) if a == b => {}
                _ => return Ok(false),
            }
        }
    }

    // ---- mutations ----

    /// Unlink the file.
    pub fn delete(&self) -> Result<()> {
        self.assert_mutable()?;
        fs::remove_file(self.path()).map_err(RoadError::at(self.path()))?;
        info!(path = %self.path().display(), "deleted file");
        Ok(())
    }

    pub async fn delete_async(&self) -> Result<()> {
        self.assert_mutable()?;
        tokio::fs::remove_file(self.path())
            .await
            .map_err(RoadError::at(self.path()))?;
        info!(path = %self.path().display(), "deleted file");
        Ok(())
    }

    /// Move into `dir`, keeping the basename.
    pub fn move_into(&mut self, dir: &Folder) -> Result<()> {
        self.assert_mutable()?;
        let dest = self.node.destination_in(dir)?;
        self.node.relocate(dest, move_file_across)
    }

    pub async fn move_into_async(&mut self, dir: &Folder) -> Result<()> {
        self.assert_mutable()?;
        let dest = self.node.destination_in(dir)?;
        self.node.relocate_async(dest, move_file_across).await
    }

    /// Copy into `dir` under the same basename, replacing a file already there.
    /// If that name already reaches this file (its own folder, or a hard link)
    /// the content is left alone and a fresh handle is returned.
    pub fn copy_into(&self, dir: &Folder) -> Result<File> {
        self.assert_mutable()?;
        let dest = self.node.destination_in(dir)?;
        let bytes = copy_file(self.path(), &dest)?;
        info!(src = %self.path().display(), dest = %dest.display(), bytes, "copied file");
        File::open(dest)
    }

    pub async fn copy_into_async(&self, dir: &Folder) -> Result<File> {
        self.assert_mutable()?;
        let dest = self.node.destination_in(dir)?;
        let (src, to) = (self.path().to_path_buf(), dest.clone());
        let bytes = tokio::task::spawn_blocking(move || copy_file(&src, &to))
            .await
            .map_err(io::Error::other)??;
        info!(src = %self.path().display(), dest = %dest.display(), bytes, "copied file");
        File::open_async(dest).await
    }

    /// Rename within the current directory.
    pub fn rename(&mut self, new_name: &str) -> Result<()> {
        self.assert_mutable()?;
        let dest = self.node.sibling(new_name)?;
        self.node.relocate(dest, move_file_across)
    }

    pub async fn rename_async(&mut self, new_name: &str) -> Result<()> {
        self.assert_mutable()?;
        let dest = self.node.sibling(new_name)?;
        self.node.relocate_async(dest, move_file_across).await
    }
}

/// Fixed-size chunk iterator over a file. A short or empty read ends it.
#[derive(Debug)]
pub struct Chunks {
    reader: fs::File,
    size: usize,
    done: bool,
}

impl Iterator for Chunks {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut buf = vec![0u8; self.size];
        let mut filled = 0;
        while filled < self.size {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
        if filled < self.size {
            self.done = true;
        }
        if filled == 0 {
            return None;
        }
        buf.truncate(filled);
        Some(Ok(buf))
    }
}

/// Async counterpart of [`Chunks`], pulled with `next_chunk`.
#[derive(Debug)]
pub struct AsyncChunks {
    reader: tokio::fs::File,
    size: usize,
    done: bool,
}

impl AsyncChunks {
    pub async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        if self.done {
            return Ok(None);
        }
        let mut buf = vec![0u8; self.size];
        let mut filled = 0;
        while filled < self.size {
            match self.reader.read(&mut buf[filled..]).await {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.done = true;
                    return Err(e.into());
                }
            }
        }
        if filled < self.size {
            self.done = true;
        }
        if filled == 0 {
            return Ok(None);
        }
        buf.truncate(filled);
        Ok(Some(buf))
    }
}
