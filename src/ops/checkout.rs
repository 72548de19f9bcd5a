use crate::error::{Error, Result};
use crate::object::read_commit;
use crate::ops::safety::{check_untracked_overwrite, clear_stale_files, restore_all_tracked};
use crate::refs::{branch_exists, current_branch, head_commit_id, set_current_branch};
use crate::repo::Repo;
use crate::staging::StagingArea;

/// `checkout -- <file>`: restore `name` from HEAD's snapshot.
pub fn checkout_head_file(repo: &Repo, name: &str) -> Result<()> {
    let head_id = head_commit_id(repo)?;
    checkout_commit_file_inner(repo, &head_id, name)
}

/// `checkout <commit-id> -- <file>`: restore `name` from the named commit.
pub fn checkout_commit_file(repo: &Repo, commit_ref: &str, name: &str) -> Result<()> {
    let id = repo.resolve_commit_id(commit_ref)?;
    checkout_commit_file_inner(repo, &id, name)
}

fn checkout_commit_file_inner(repo: &Repo, id: &crate::hash::Id, name: &str) -> Result<()> {
    let commit = read_commit(repo, id)?;
    let path = repo.resolve_working_path(name);
    let key = path.to_string_lossy().to_string();

    let blob_id = commit.tracked.get(&key).ok_or(Error::NotInCommit)?;
    let blob = crate::object::read_blob(repo, blob_id)?;
    blob.restore(&path)
}

/// `checkout <branch>`: switch HEAD, the staging area, and the working tree
/// wholesale to the tip of `branch`.
pub fn checkout_branch(repo: &Repo, branch: &str) -> Result<()> {
    if !branch_exists(repo, branch) {
        return Err(Error::NoSuchBranch);
    }
    if current_branch(repo)? == branch {
        return Err(Error::AlreadyOnBranch);
    }

    let target_id = crate::refs::branch_tip(repo, branch)?;
    let target_commit = read_commit(repo, &target_id)?;

    let mut staging = StagingArea::load(repo)?;
    check_untracked_overwrite(repo, &staging, &target_commit.tracked)?;

    clear_stale_files(repo, staging.tracked(), &target_commit.tracked)?;
    restore_all_tracked(repo, &target_commit.tracked)?;
    staging.clear();
    staging.save(repo)?;
    set_current_branch(repo, branch)?;

    tracing::debug!(branch, commit = %target_id, "checked out branch");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{add, branch, commit};
    use std::fs;
    use tempfile::tempdir;

    fn test_repo() -> (tempfile::TempDir, Repo) {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        (dir, repo)
    }

    #[test]
    fn checkout_head_file_restores_tracked_content() {
        let (dir, repo) = test_repo();
        let file = dir.path().join("a.txt");
        fs::write(&file, "original").unwrap();
        add(&repo, "a.txt").unwrap();
        commit(&repo, "first").unwrap();

        fs::write(&file, "scribbled").unwrap();
        checkout_head_file(&repo, "a.txt").unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "original");
    }

    #[test]
    fn checkout_head_file_missing_from_commit_fails() {
        let (_dir, repo) = test_repo();
        assert!(matches!(
            checkout_head_file(&repo, "nope.txt"),
            Err(Error::NotInCommit)
        ));
    }

    #[test]
    fn checkout_same_branch_fails() {
        let (_dir, repo) = test_repo();
        assert!(matches!(
            checkout_branch(&repo, "master"),
            Err(Error::AlreadyOnBranch)
        ));
    }

    #[test]
    fn checkout_unknown_branch_fails() {
        let (_dir, repo) = test_repo();
        assert!(matches!(
            checkout_branch(&repo, "nope"),
            Err(Error::NoSuchBranch)
        ));
    }

    #[test]
    fn checkout_branch_restores_its_snapshot() {
        let (dir, repo) = test_repo();
        let file = dir.path().join("a.txt");
        fs::write(&file, "on master").unwrap();
        add(&repo, "a.txt").unwrap();
        commit(&repo, "first").unwrap();

        branch(&repo, "feature").unwrap();
        checkout_branch(&repo, "feature").unwrap();

        fs::write(&file, "on feature").unwrap();
        add(&repo, "a.txt").unwrap();
        commit(&repo, "second").unwrap();

        checkout_branch(&repo, "master").unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "on master");

        checkout_branch(&repo, "feature").unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "on feature");
    }

    #[test]
    fn checkout_branch_refuses_to_clobber_untracked_file() {
        let (dir, repo) = test_repo();
        let file = dir.path().join("a.txt");
        fs::write(&file, "on master").unwrap();
        add(&repo, "a.txt").unwrap();
        commit(&repo, "first").unwrap();
        branch(&repo, "feature").unwrap();

        rm(&repo, "a.txt").ok();
        fs::remove_file(&file).ok();
        fs::write(&file, "untracked and in the way").unwrap();

        // a.txt is untracked on disk right now relative to staging, and
        // feature's tip would overwrite it with different content.
        let result = checkout_branch(&repo, "feature");
        assert!(result.is_err());
    }

    fn rm(repo: &Repo, name: &str) -> Result<()> {
        crate::ops::rm(repo, name)
    }

    #[test]
    fn checkout_branch_leaves_unrelated_untracked_file_alone() {
        let (dir, repo) = test_repo();
        let a = dir.path().join("a.txt");
        fs::write(&a, "v1").unwrap();
        add(&repo, "a.txt").unwrap();
        commit(&repo, "first").unwrap();

        branch(&repo, "feature").unwrap();
        checkout_branch(&repo, "feature").unwrap();
        fs::write(&a, "v2").unwrap();
        add(&repo, "a.txt").unwrap();
        commit(&repo, "second").unwrap();
        checkout_branch(&repo, "master").unwrap();

        let b = dir.path().join("b.txt");
        fs::write(&b, "untracked by either branch").unwrap();

        checkout_branch(&repo, "feature").unwrap();

        assert!(b.is_file());
        assert_eq!(fs::read_to_string(&b).unwrap(), "untracked by either branch");
        assert_eq!(fs::read_to_string(&a).unwrap(), "v2");
    }
}
