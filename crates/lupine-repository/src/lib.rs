//! Lupine Repository
//!
//! This crate provides the retrieved-output storage trait and
//! implementations for lupine. A repository holds the files a completed
//! process left behind: individual files are opened as byte streams and
//! directories are listed with a type tag per entry.
//!
//! The [`Store`] trait defines the storage layer. Implementations handle
//! the actual backend while callers stay agnostic to where the bytes live;
//! [`FsStore`] serves a plain directory tree.
//!
//! The trait uses async streaming so large output files never have to be
//! buffered whole.

mod fs;

pub use fs::FsStore;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

/// A boxed stream of bytes for file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, Error>> + Send>>;

/// Error type for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The requested path was not found in the repository.
  #[error("path not found: {0}")]
  NotFound(String),

  /// An I/O error occurred.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Type tag distinguishing directory entries from file entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
  File,
  Directory,
}

/// A single entry in a repository listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
  pub name: String,
  pub kind: EntryKind,
}

/// Retrieved-output storage trait.
///
/// Implementations provide the actual storage backend.
#[async_trait]
pub trait Store: Send + Sync {
  /// Open a file by name, returning its contents as a byte stream.
  async fn open(&self, name: &str) -> Result<ByteStream, Error>;

  /// List the entries under `path`, sorted by name.
  ///
  /// An empty `path` lists the repository root. Returns
  /// [`Error::NotFound`] if the path does not exist in the store.
  async fn list(&self, path: &str) -> Result<Vec<Entry>, Error>;
}
