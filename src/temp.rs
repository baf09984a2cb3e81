//! Scoped temporary files and folders.
//!
//! Each resource gets a unique name under `Settings::temp_dir` and is removed on
//! `close()`, or on drop if it was never closed. Cleanup is best-effort: a
//! failure is logged and swallowed so it never masks the caller's own error.

use std::io;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

use crate::config::Settings;
use crate::errors::Result;
use crate::road::{File, Folder};

/// `<prefix>-<unix nanos>-<pid>-<random u32>` inside `dir`.
pub(crate) fn unique_path(dir: &Path, prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let salt: u32 = rand::random();
    dir.join(format!("{prefix}-{nanos}-{}-{salt}", std::process::id()))
}

fn report(path: &Path, what: &str, res: io::Result<()>) {
    match res {
        Ok(()) => debug!(path = %path.display(), "removed temporary {what}"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "temporary {what} already gone")
        }
        Err(e) => warn!(path = %path.display(), error = %e, "failed to remove temporary {what}"),
    }
}

/// A regular file that deletes itself.
#[derive(Debug)]
pub struct TempFile {
    file: File,
    closed: bool,
}

impl TempFile {
    pub fn new() -> Result<TempFile> {
        let s = Settings::global();
        Self::wrap(File::create(unique_path(&s.temp_dir, &s.temp_prefix))?)
    }

    pub async fn new_async() -> Result<TempFile> {
        let s = Settings::global();
        Self::wrap(File::create_async(unique_path(&s.temp_dir, &s.temp_prefix)).await?)
    }

    fn wrap(mut file: File) -> Result<TempFile> {
        file.set_mutable(true);
        debug!(path = %file.location().display(), "created temporary file");
        Ok(TempFile {
            file,
            closed: false,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Remove the file. Safe to call more than once.
    pub fn close(&mut self) {
        if std::mem::replace(&mut self.closed, true) {
            return;
        }
        let path = self.file.location();
        report(path, "file", std::fs::remove_file(path));
    }

    pub async fn close_async(&mut self) {
        if std::mem::replace(&mut self.closed, true) {
            return;
        }
        let path = self.file.location();
        report(path, "file", tokio::fs::remove_file(path).await);
    }
}

impl Deref for TempFile {
    type Target = File;
    fn deref(&self) -> &File {
        &self.file
    }
}

impl DerefMut for TempFile {
    fn deref_mut(&mut self) -> &mut File {
        &mut self.file
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        self.close();
    }
}

/// A directory that deletes itself and its contents.
#[derive(Debug)]
pub struct TempFolder {
    folder: Folder,
    closed: bool,
}

impl TempFolder {
    pub fn new() -> Result<TempFolder> {
        let s = Settings::global();
        Self::wrap(Folder::create(unique_path(&s.temp_dir, &s.temp_prefix))?)
    }

    pub async fn new_async() -> Result<TempFolder> {
        let s = Settings::global();
        Self::wrap(Folder::create_async(unique_path(&s.temp_dir, &s.temp_prefix)).await?)
    }

    fn wrap(mut folder: Folder) -> Result<TempFolder> {
        folder.set_mutable(true);
        debug!(path = %folder.location().display(), "created temporary folder");
        Ok(TempFolder {
            folder,
            closed: false,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn close(&mut self) {
        if std::mem::replace(&mut self.closed, true) {
            return;
        }
        let path = self.folder.location();
        report(path, "folder", std::fs::remove_dir_all(path));
    }

    pub async fn close_async(&mut self) {
        if std::mem::replace(&mut self.closed, true) {
            return;
        }
        let path = self.folder.location();
        report(path, "folder", tokio::fs::remove_dir_all(path).await);
    }
}

impl Deref for TempFolder {
    type Target = Folder;
    fn deref(&self) -> &Folder {
        &self.folder
    }
}

impl DerefMut for TempFolder {
    fn deref_mut(&mut self) -> &mut Folder {
        &mut self.folder
    }
}

impl Drop for TempFolder {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn unique_paths_differ() {
        let dir = Path::new("/tmp");
        let names: HashSet<_> = (0..64).map(|_| unique_path(dir, "t")).collect();
        assert_eq!(names.len(), 64);
    }

    #[test]
    fn name_carries_prefix_and_pid() {
        let p = unique_path(Path::new("/tmp"), "road");
        let name = p.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("road-"));
        assert!(name.contains(&format!("-{}-", std::process::id())));
    }
}
