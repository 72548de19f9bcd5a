use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::hash::Id;
use crate::object::read_blob;
use crate::repo::Repo;
use crate::staging::StagingArea;
use crate::types::Blob;

/// the "untracked file in the way" guard shared by branch-checkout, reset,
/// and merge: a working-tree file is untracked (not in HEAD.tracked minus
/// removed, and not newly `added`) and the operation is about to overwrite
/// it with different content from `target`.
pub fn check_untracked_overwrite(
    repo: &Repo,
    staging: &StagingArea,
    target: &BTreeMap<String, Id>,
) -> Result<()> {
    for path in repo.working_tree_files()? {
        let key = path.to_string_lossy().to_string();

        let tracked_after_staging = (staging.tracked().contains_key(&key)
            && !staging.removed().contains(&key))
            || staging.added().contains_key(&key);
        if tracked_after_staging {
            continue;
        }

        if let Some(target_id) = target.get(&key) {
            let current = Blob::from_file(&path)?;
            if current.id() != *target_id {
                return Err(Error::UntrackedOverwrite);
            }
        }
    }
    Ok(())
}

/// delete the files that belonged to `source` (the snapshot being moved
/// away from) and aren't carried into `target`, ahead of
/// `restore_all_tracked(repo, target)` repopulating the rest.
///
/// a file the working tree holds that `source` never tracked either is left
/// alone regardless of what `target` says — it was never part of either
/// snapshot, so this switch has nothing to say about it.
pub fn clear_stale_files(
    repo: &Repo,
    source: &BTreeMap<String, Id>,
    target: &BTreeMap<String, Id>,
) -> Result<()> {
    for path in repo.working_tree_files()? {
        let key = path.to_string_lossy().to_string();
        if !source.contains_key(&key) || target.contains_key(&key) {
            continue;
        }
        std::fs::remove_file(&path).map_err(|e| crate::error::Error::Io { path, source: e })?;
    }
    Ok(())
}

/// write every blob in `tracked` back out to its path, recreating the full
/// snapshot in the working tree.
pub fn restore_all_tracked(repo: &Repo, tracked: &BTreeMap<String, Id>) -> Result<()> {
    for (path, id) in tracked {
        let blob = read_blob(repo, id)?;
        blob.restore(std::path::Path::new(path))?;
    }
    Ok(())
}
