use crate::error::{Error, Result};
use crate::hash::Id;
use crate::object::write_commit;
use crate::refs::{current_branch, head_commit_id, set_branch_tip};
use crate::repo::Repo;
use crate::staging::StagingArea;
use crate::types::Commit;

/// drain staging into a new ordinary commit, advancing the current branch.
pub fn commit(repo: &Repo, message: &str) -> Result<Id> {
    if message.trim().is_empty() {
        return Err(Error::EmptyCommitMessage);
    }

    let mut staging = StagingArea::load(repo)?;
    if staging.is_clean() {
        return Err(Error::NoChanges);
    }

    let parent = head_commit_id(repo)?;
    let tracked = staging.commit_drain();
    let new_commit = Commit::new(vec![parent], message, tracked);
    let id = write_commit(repo, &new_commit)?;

    staging.save(repo)?;
    let branch = current_branch(repo)?;
    set_branch_tip(repo, &branch, &id)?;

    tracing::debug!(commit = %id, branch, "committed");
    Ok(id)
}

/// build and write a merge commit with two explicit parents and an
/// already-drained tracked map; used only by `ops::merge`.
pub(crate) fn commit_merge(
    repo: &Repo,
    parents: Vec<Id>,
    message: &str,
    tracked: std::collections::BTreeMap<String, Id>,
) -> Result<Id> {
    let new_commit = Commit::new(parents, message, tracked);
    let id = write_commit(repo, &new_commit)?;
    let branch = current_branch(repo)?;
    set_branch_tip(repo, &branch, &id)?;
    Ok(id)
}
