//! Whole-file byte producers and consumers.
//!
//! The codec and cipher never open files themselves; they read and write
//! complete byte buffers through a `ByteStore`. `FsStore` maps paths onto
//! the filesystem, `MemoryStore` keeps everything in a map.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Read-all / write-all access to named byte buffers.
pub trait ByteStore {
    fn read_all(&self, path: &Path) -> Result<Vec<u8>>;

    /// Create or truncate `path` and write `bytes` to it.
    fn write_all(&self, path: &Path, bytes: &[u8]) -> Result<()>;

    /// Read `path` as UTF-8 text.
    ///
    /// # Errors
    /// `Error::Io` with `InvalidData` if the bytes are not valid UTF-8.
    fn read_text(&self, path: &Path) -> Result<String> {
        let bytes = self.read_all(path)?;
        String::from_utf8(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }
}

/// Filesystem-backed store. Handles are closed when they go out of scope,
/// on error paths as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl ByteStore for FsStore {
    fn read_all(&self, path: &Path) -> Result<Vec<u8>> {
        let mut file = File::open(path)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    fn write_all(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(())
    }
}

/// In-memory store keyed by path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RefCell<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, bytes: Vec<u8>) {
        self.files.borrow_mut().insert(path.into(), bytes);
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    pub fn len(&self) -> usize {
        self.files.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.borrow().is_empty()
    }
}

impl ByteStore for MemoryStore {
    fn read_all(&self, path: &Path) -> Result<Vec<u8>> {
        self.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
            .into()
        })
    }

    fn write_all(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        self.insert(path, bytes.to_vec());
        Ok(())
    }
}
