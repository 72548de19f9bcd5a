use crate::error::{Error, Result};
use crate::refs::{branch_exists, current_branch, delete_branch, head_commit_id, set_branch_tip};
use crate::repo::Repo;

/// create a new branch pointing at HEAD's commit. does not switch to it.
pub fn branch(repo: &Repo, name: &str) -> Result<()> {
    if branch_exists(repo, name) {
        return Err(Error::BranchExists);
    }
    let head_id = head_commit_id(repo)?;
    set_branch_tip(repo, name, &head_id)
}

/// delete a branch ref. refuses to delete the currently checked-out branch.
pub fn rm_branch(repo: &Repo, name: &str) -> Result<()> {
    if !branch_exists(repo, name) {
        return Err(Error::NoSuchBranch);
    }
    if current_branch(repo)? == name {
        return Err(Error::RemoveCurrentBranch);
    }
    delete_branch(repo, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_repo() -> (tempfile::TempDir, Repo) {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        (dir, repo)
    }

    #[test]
    fn branch_creates_ref_at_head() {
        let (_dir, repo) = test_repo();
        branch(&repo, "feature").unwrap();
        assert_eq!(
            crate::refs::branch_tip(&repo, "feature").unwrap(),
            head_commit_id(&repo).unwrap()
        );
    }

    #[test]
    fn branch_with_existing_name_fails() {
        let (_dir, repo) = test_repo();
        assert!(matches!(branch(&repo, "master"), Err(Error::BranchExists)));
    }

    #[test]
    fn rm_branch_removes_other_branch() {
        let (_dir, repo) = test_repo();
        branch(&repo, "feature").unwrap();
        rm_branch(&repo, "feature").unwrap();
        assert!(!branch_exists(&repo, "feature"));
    }

    #[test]
    fn rm_branch_refuses_current_branch() {
        let (_dir, repo) = test_repo();
        assert!(matches!(
            rm_branch(&repo, "master"),
            Err(Error::RemoveCurrentBranch)
        ));
    }

    #[test]
    fn rm_branch_unknown_fails() {
        let (_dir, repo) = test_repo();
        assert!(matches!(rm_branch(&repo, "nope"), Err(Error::NoSuchBranch)));
    }
}
