use crate::error::Result;
use crate::object::read_commit;
use crate::ops::safety::{check_untracked_overwrite, clear_stale_files, restore_all_tracked};
use crate::refs::{current_branch, set_branch_tip};
use crate::repo::Repo;
use crate::staging::StagingArea;

/// move the current branch's tip to `commit_ref`, restoring its snapshot
/// into the working tree and clearing staging. HEAD keeps pointing at the
/// same branch, now advanced (or rewound) to a different commit.
pub fn reset(repo: &Repo, commit_ref: &str) -> Result<()> {
    let target_id = repo.resolve_commit_id(commit_ref)?;
    let target_commit = read_commit(repo, &target_id)?;

    let mut staging = StagingArea::load(repo)?;
    check_untracked_overwrite(repo, &staging, &target_commit.tracked)?;

    clear_stale_files(repo, staging.tracked(), &target_commit.tracked)?;
    restore_all_tracked(repo, &target_commit.tracked)?;
    staging.clear();
    staging.save(repo)?;

    let branch = current_branch(repo)?;
    set_branch_tip(repo, &branch, &target_id)?;

    tracing::debug!(commit = %target_id, "reset");
    Ok(())
}
