//! Filesystem-backed repository.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::TryStreamExt;
use tokio_util::io::ReaderStream;

use crate::{ByteStream, Entry, EntryKind, Error, Store};

/// Repository implementation over a plain directory tree.
///
/// File and path names are resolved relative to the root directory.
#[derive(Debug, Clone)]
pub struct FsStore {
  root: PathBuf,
}

impl FsStore {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }
}

#[async_trait]
impl Store for FsStore {
  async fn open(&self, name: &str) -> Result<ByteStream, Error> {
    let path = self.root.join(name);

    let file = match tokio::fs::File::open(&path).await {
      Ok(file) => file,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        return Err(Error::NotFound(name.to_string()));
      }
      Err(e) => return Err(Error::Io(e)),
    };

    let stream = ReaderStream::new(file).map_err(Error::Io);
    Ok(Box::pin(stream))
  }

  async fn list(&self, path: &str) -> Result<Vec<Entry>, Error> {
    let dir = if path.is_empty() {
      self.root.clone()
    } else {
      self.root.join(path)
    };

    let mut read_dir = match tokio::fs::read_dir(&dir).await {
      Ok(read_dir) => read_dir,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        return Err(Error::NotFound(path.to_string()));
      }
      Err(e) => return Err(Error::Io(e)),
    };

    let mut entries = Vec::new();
    while let Some(dir_entry) = read_dir.next_entry().await? {
      let file_type = dir_entry.file_type().await?;
      let kind = if file_type.is_dir() {
        EntryKind::Directory
      } else {
        EntryKind::File
      };

      entries.push(Entry {
        name: dir_entry.file_name().to_string_lossy().into_owned(),
        kind,
      });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
  }
}
