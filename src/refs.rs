use std::fs;

use crate::error::{Error, IoResultExt, Result};
use crate::hash::Id;
use crate::repo::Repo;

/// the tip commit id of `branch`.
pub fn branch_tip(repo: &Repo, branch: &str) -> Result<Id> {
    let path = repo.refs_heads_path().join(branch);
    let content = fs::read_to_string(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::NoSuchBranch
        } else {
            Error::Io {
                path: path.clone(),
                source: e,
            }
        }
    })?;
    Id::from_hex(content.trim())
}

/// advance (or create) `branch`'s tip to `id`.
pub fn set_branch_tip(repo: &Repo, branch: &str, id: &Id) -> Result<()> {
    let path = repo.refs_heads_path().join(branch);
    repo.write_atomic(&path, format!("{}\n", id.to_hex()).as_bytes())
}

/// does this branch have a tip on disk?
pub fn branch_exists(repo: &Repo, branch: &str) -> bool {
    repo.refs_heads_path().join(branch).is_file()
}

/// delete a branch ref.
pub fn delete_branch(repo: &Repo, branch: &str) -> Result<()> {
    let path = repo.refs_heads_path().join(branch);
    fs::remove_file(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::NoSuchBranch
        } else {
            Error::Io { path, source: e }
        }
    })
}

/// every branch name, sorted lexicographically.
pub fn list_branches(repo: &Repo) -> Result<Vec<String>> {
    let dir = repo.refs_heads_path();
    let mut names = Vec::new();
    for entry in fs::read_dir(&dir).with_path(&dir)? {
        let entry = entry.with_path(&dir)?;
        if entry.path().is_file() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// the branch HEAD currently points to.
pub fn current_branch(repo: &Repo) -> Result<String> {
    let path = repo.head_path();
    let content = fs::read_to_string(&path).with_path(&path)?;
    let trimmed = content.trim();
    trimmed
        .strip_prefix("ref: refs/heads/")
        .map(|s| s.to_string())
        .ok_or_else(|| Error::CorruptObject(format!("malformed HEAD: {trimmed}")))
}

/// point HEAD at a different branch (the branch need not yet exist on disk;
/// callers create refs separately).
pub fn set_current_branch(repo: &Repo, branch: &str) -> Result<()> {
    let path = repo.head_path();
    repo.write_atomic(&path, format!("ref: refs/heads/{}\n", branch).as_bytes())
}

/// the commit id HEAD's branch currently points to.
pub fn head_commit_id(repo: &Repo) -> Result<Id> {
    let branch = current_branch(repo)?;
    branch_tip(repo, &branch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_default_branch_is_master() {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        assert_eq!(current_branch(&repo).unwrap(), "master");
    }

    #[test]
    fn set_and_read_branch_tip() {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        let id = Id::from_hex("abcdef0123456789abcdef0123456789abcdef").unwrap();

        set_branch_tip(&repo, "feature", &id).unwrap();
        assert_eq!(branch_tip(&repo, "feature").unwrap(), id);
    }

    #[test]
    fn list_branches_is_sorted() {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        let id = head_commit_id(&repo).unwrap();

        set_branch_tip(&repo, "zeta", &id).unwrap();
        set_branch_tip(&repo, "alpha", &id).unwrap();

        assert_eq!(list_branches(&repo).unwrap(), vec!["alpha", "master", "zeta"]);
    }

    #[test]
    fn delete_branch_removes_ref() {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        let id = head_commit_id(&repo).unwrap();
        set_branch_tip(&repo, "temp", &id).unwrap();

        delete_branch(&repo, "temp").unwrap();
        assert!(!branch_exists(&repo, "temp"));
    }

    #[test]
    fn missing_branch_tip_is_no_such_branch() {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        assert!(matches!(branch_tip(&repo, "nope"), Err(Error::NoSuchBranch)));
    }
}
