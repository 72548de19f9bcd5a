use std::path::{Path, PathBuf};

use crate::error::{Error, IoResultExt, Result};
use crate::object::{commit::write_commit, resolve};
use crate::refs::{set_branch_tip, set_current_branch};
use crate::types::Commit;

const METADATA_DIR: &str = ".gitlet";
const DEFAULT_BRANCH: &str = "master";

/// a handle onto one working directory's `.gitlet` metadata.
///
/// paths are resolved once at construction and memoized for the lifetime
/// of this handle, per the "lazy-loading of HEAD state" design note: the
/// working directory is captured at process start and never re-queried.
#[derive(Clone, Debug)]
pub struct Repo {
    root: PathBuf,
    metadata_dir: PathBuf,
}

impl Repo {
    /// initialize a new repository rooted at `root`.
    ///
    /// creates the metadata skeleton, writes the initial commit, and points
    /// `master` (and HEAD) at it.
    pub fn init(root: &Path) -> Result<Self> {
        let metadata_dir = root.join(METADATA_DIR);
        if metadata_dir.exists() {
            return Err(Error::AlreadyInitialized);
        }

        std::fs::create_dir_all(&metadata_dir).with_path(&metadata_dir)?;
        let repo = Self {
            root: root.to_path_buf(),
            metadata_dir,
        };

        std::fs::create_dir_all(repo.objects_path()).with_path(repo.objects_path())?;
        std::fs::create_dir_all(repo.refs_heads_path()).with_path(repo.refs_heads_path())?;
        std::fs::create_dir_all(repo.tmp_path()).with_path(repo.tmp_path())?;

        let initial = Commit::initial();
        let initial_id = write_commit(&repo, &initial)?;
        set_branch_tip(&repo, DEFAULT_BRANCH, &initial_id)?;
        set_current_branch(&repo, DEFAULT_BRANCH)?;

        tracing::debug!(root = %repo.root.display(), "initialized repository");
        Ok(repo)
    }

    /// open an existing repository rooted at `root`.
    pub fn open(root: &Path) -> Result<Self> {
        let metadata_dir = root.join(METADATA_DIR);
        if !metadata_dir.is_dir() {
            return Err(Error::NotInitialized);
        }
        Ok(Self {
            root: root.to_path_buf(),
            metadata_dir,
        })
    }

    /// working-tree root
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn metadata_dir(&self) -> &Path {
        &self.metadata_dir
    }

    pub fn objects_path(&self) -> PathBuf {
        self.metadata_dir.join("objects")
    }

    pub fn refs_heads_path(&self) -> PathBuf {
        self.metadata_dir.join("refs").join("heads")
    }

    pub fn head_path(&self) -> PathBuf {
        self.metadata_dir.join("HEAD")
    }

    pub fn index_path(&self) -> PathBuf {
        self.metadata_dir.join("index")
    }

    pub fn tmp_path(&self) -> PathBuf {
        self.metadata_dir.join("tmp")
    }

    /// resolve a user-supplied name to an absolute working-tree path.
    /// accepts both bare file names and already-absolute paths.
    pub fn resolve_working_path(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// expand a `>=4`-char hex prefix to a full commit id.
    pub fn resolve_commit_id(&self, prefix: &str) -> Result<crate::hash::Id> {
        resolve(self, prefix)
    }

    /// the regular files directly under the working root (no recursion,
    /// the metadata directory excluded).
    pub fn working_tree_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.root).with_path(&self.root)? {
            let entry = entry.with_path(&self.root)?;
            let path = entry.path();
            if path == self.metadata_dir {
                continue;
            }
            if path.is_file() {
                files.push(path);
            }
        }
        Ok(files)
    }

    /// write `bytes` to `path` atomically: through a tmp file under
    /// `.gitlet/tmp`, fsynced, then renamed into place — the same sequence
    /// the object store uses for blobs and commits.
    pub(crate) fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_path(parent)?;
        }
        std::fs::create_dir_all(self.tmp_path()).with_path(self.tmp_path())?;

        let tmp_path = self.tmp_path().join(uuid::Uuid::new_v4().to_string());
        {
            use std::io::Write;
            let mut tmp_file = std::fs::File::create(&tmp_path).with_path(&tmp_path)?;
            tmp_file.write_all(bytes).with_path(&tmp_path)?;
            tmp_file.sync_all().with_path(&tmp_path)?;
        }
        std::fs::rename(&tmp_path, path).with_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_creates_metadata_skeleton() {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();

        assert!(repo.objects_path().is_dir());
        assert!(repo.refs_heads_path().is_dir());
        assert!(repo.head_path().is_file());
        assert!(repo.refs_heads_path().join("master").is_file());
    }

    #[test]
    fn init_twice_fails() {
        let dir = tempdir().unwrap();
        Repo::init(dir.path()).unwrap();
        assert!(matches!(Repo::init(dir.path()), Err(Error::AlreadyInitialized)));
    }

    #[test]
    fn open_without_init_fails() {
        let dir = tempdir().unwrap();
        assert!(matches!(Repo::open(dir.path()), Err(Error::NotInitialized)));
    }

    #[test]
    fn resolve_working_path_handles_absolute_and_relative() {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();

        let relative = repo.resolve_working_path("a.txt");
        assert_eq!(relative, dir.path().join("a.txt"));

        let absolute = repo.resolve_working_path(dir.path().join("b.txt").to_str().unwrap());
        assert_eq!(absolute, dir.path().join("b.txt"));
    }
}
