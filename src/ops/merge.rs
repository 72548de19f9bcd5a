use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use crate::error::{Error, Result};
use crate::hash::Id;
use crate::object::{read_blob, read_commit, write_blob};
use crate::ops::commit::commit_merge;
use crate::ops::safety::{check_untracked_overwrite, clear_stale_files, restore_all_tracked};
use crate::refs::{branch_exists, branch_tip, current_branch, head_commit_id, set_branch_tip};
use crate::repo::Repo;
use crate::staging::StagingArea;
use crate::types::{Blob, Commit};

/// three-way merge of `other` into the current branch.
///
/// returns an informational line to print on success (empty when the merge
/// produced an ordinary merge commit with no conflicts); errors for every
/// precondition failure.
pub fn merge(repo: &Repo, other: &str) -> Result<String> {
    let staging = StagingArea::load(repo)?;
    if !staging.is_clean() {
        return Err(Error::UncommittedChanges);
    }
    if !branch_exists(repo, other) {
        return Err(Error::NoSuchBranch);
    }
    let current = current_branch(repo)?;
    if current == other {
        return Err(Error::MergeWithSelf);
    }

    let head_id = head_commit_id(repo)?;
    let other_id = branch_tip(repo, other)?;
    let other_commit = read_commit(repo, &other_id)?;

    check_untracked_overwrite(repo, &staging, &other_commit.tracked)?;

    let lca_id = latest_common_ancestor(repo, head_id, other_id)?;

    if lca_id == other_id {
        return Ok("Given branch is an ancestor of the current branch.\n".to_string());
    }
    if lca_id == head_id {
        clear_stale_files(repo, staging.tracked(), &other_commit.tracked)?;
        restore_all_tracked(repo, &other_commit.tracked)?;
        let mut staging = staging;
        staging.clear();
        staging.save(repo)?;
        set_branch_tip(repo, &current, &other_id)?;
        return Ok("Current branch fast-forwarded.\n".to_string());
    }

    let lca_commit = read_commit(repo, &lca_id)?;
    let head_commit = read_commit(repo, &head_id)?;

    let mut paths: HashSet<&String> = HashSet::new();
    paths.extend(lca_commit.tracked.keys());
    paths.extend(head_commit.tracked.keys());
    paths.extend(other_commit.tracked.keys());

    let mut final_tracked = head_commit.tracked.clone();
    let mut conflicted = false;

    for path in paths {
        let l = lca_commit.tracked.get(path);
        let h = head_commit.tracked.get(path);
        let o = other_commit.tracked.get(path);

        if h == o {
            continue;
        }
        if l == h {
            apply_other_version(repo, path, o, &mut final_tracked)?;
        } else if l == o {
            // head already holds the right version
            continue;
        } else {
            conflicted = true;
            write_conflict(repo, path, h, o, &mut final_tracked)?;
        }
    }

    let mut staging = staging;
    staging.clear();
    staging.save(repo)?;

    let message = format!("Merged {} into {}.", other, current);
    commit_merge(repo, vec![head_id, other_id], &message, final_tracked)?;

    if conflicted {
        Ok("Encountered a merge conflict.\n".to_string())
    } else {
        Ok(String::new())
    }
}

fn apply_other_version(
    repo: &Repo,
    path: &str,
    o: Option<&Id>,
    final_tracked: &mut BTreeMap<String, Id>,
) -> Result<()> {
    let target_path = std::path::Path::new(path);
    match o {
        Some(id) => {
            let blob = read_blob(repo, id)?;
            blob.restore(target_path)?;
            final_tracked.insert(path.to_string(), *id);
        }
        None => {
            if target_path.exists() {
                std::fs::remove_file(target_path)
                    .map_err(|e| Error::Io { path: target_path.to_path_buf(), source: e })?;
            }
            final_tracked.remove(path);
        }
    }
    Ok(())
}

fn write_conflict(
    repo: &Repo,
    path: &str,
    h: Option<&Id>,
    o: Option<&Id>,
    final_tracked: &mut BTreeMap<String, Id>,
) -> Result<()> {
    let head_content = match h {
        Some(id) => read_blob(repo, id)?.content().to_vec(),
        None => Vec::new(),
    };
    let other_content = match o {
        Some(id) => read_blob(repo, id)?.content().to_vec(),
        None => Vec::new(),
    };

    let mut merged = Vec::new();
    merged.extend_from_slice(b"<<<<<<< HEAD\n");
    merged.extend_from_slice(&head_content);
    merged.extend_from_slice(b"=======\n");
    merged.extend_from_slice(&other_content);
    merged.extend_from_slice(b">>>>>>>\n");

    let target_path = std::path::Path::new(path);
    let blob = Blob::new(target_path.to_path_buf(), merged);
    blob.restore(target_path)?;
    let id = write_blob(repo, &blob)?;
    final_tracked.insert(path.to_string(), id);
    Ok(())
}

/// among the commits reachable from both `a` and `b`, the one with the
/// latest `Date` — ties broken by id, descending, for determinism.
fn latest_common_ancestor(repo: &Repo, a: Id, b: Id) -> Result<Id> {
    let a_ancestors = ancestors(repo, a)?;
    let b_ancestors = ancestors(repo, b)?;

    a_ancestors
        .iter()
        .filter(|(id, _)| b_ancestors.contains_key(*id))
        .max_by(|(id1, c1), (id2, c2)| c1.timestamp.cmp(&c2.timestamp).then(id1.cmp(id2)))
        .map(|(id, _)| *id)
        // the initial commit is an ancestor of everything, so this is
        // unreachable in a well-formed repository.
        .ok_or_else(|| Error::CorruptObject("no common ancestor".to_string()))
}

/// every commit reachable from `start` (`start` included), keyed by id.
fn ancestors(repo: &Repo, start: Id) -> Result<HashMap<Id, Commit>> {
    let mut seen = HashMap::new();
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(id) = queue.pop_front() {
        if seen.contains_key(&id) {
            continue;
        }
        let commit: Commit = read_commit(repo, &id)?;
        for parent in &commit.parents {
            queue.push_back(*parent);
        }
        seen.insert(id, commit);
    }
    Ok(seen)
}
