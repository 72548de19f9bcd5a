use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IoResultExt, Result};
use crate::hash::{compute_blob_id, Id};

/// an immutable snapshot of a file's content at some point in time.
///
/// identity is a pure function of `(path, content)`; two blobs built from
/// the same path and bytes always collide to the same id.
#[derive(Clone, Debug)]
pub struct Blob {
    path: PathBuf,
    content: Vec<u8>,
}

impl Blob {
    /// read the working-tree file at `path` into a new blob.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read(path).with_path(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }

    pub fn new(path: PathBuf, content: Vec<u8>) -> Self {
        Self { path, content }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// content-addressed identity of this blob
    pub fn id(&self) -> Id {
        compute_blob_id(&self.path, &self.content)
    }

    /// re-materialize this blob's content at `path`, overwriting anything there.
    pub fn restore(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.content).with_path(path)
    }
}
