use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IoResultExt, Result};
use crate::hash::Id;
use crate::object::{commit::read_commit, write_blob};
use crate::refs::head_commit_id;
use crate::repo::Repo;
use crate::types::Blob;

/// the part of the staging area that's actually persisted to `.gitlet/index`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct Index {
    added: BTreeMap<String, Id>,
    removed: BTreeSet<String>,
}

/// the staging area: `added`/`removed` from disk, plus a `tracked` view
/// injected from the current HEAD commit's snapshot. `tracked` is never
/// persisted — it's recomputed from HEAD on every load.
#[derive(Clone, Debug)]
pub struct StagingArea {
    added: BTreeMap<String, Id>,
    removed: BTreeSet<String>,
    tracked: BTreeMap<String, Id>,
}

impl StagingArea {
    /// load the persisted added/removed sets and inject HEAD's tracked
    /// snapshot. a fresh repository has an empty index and an empty
    /// tracked map (the initial commit tracks nothing).
    pub fn load(repo: &Repo) -> Result<Self> {
        let index = if repo.index_path().is_file() {
            let bytes = std::fs::read(repo.index_path()).with_path(repo.index_path())?;
            ciborium::from_reader(&bytes[..])?
        } else {
            Index::default()
        };

        let head_id = head_commit_id(repo)?;
        let head = read_commit(repo, &head_id)?;

        Ok(Self {
            added: index.added,
            removed: index.removed,
            tracked: head.tracked,
        })
    }

    /// persist `added`/`removed` to `.gitlet/index`.
    pub fn save(&self, repo: &Repo) -> Result<()> {
        let index = Index {
            added: self.added.clone(),
            removed: self.removed.clone(),
        };
        let mut bytes = Vec::new();
        ciborium::into_writer(&index, &mut bytes)?;
        repo.write_atomic(&repo.index_path(), &bytes)
    }

    pub fn tracked(&self) -> &BTreeMap<String, Id> {
        &self.tracked
    }

    pub fn added(&self) -> &BTreeMap<String, Id> {
        &self.added
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    pub fn is_clean(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// `(HEAD.tracked ∪ added) \ removed` — the snapshot that would result
    /// from committing right now.
    pub fn effective(&self) -> BTreeMap<String, Id> {
        let mut effective = self.tracked.clone();
        for (path, id) in &self.added {
            effective.insert(path.clone(), *id);
        }
        for path in &self.removed {
            effective.remove(path);
        }
        effective
    }

    /// stage `path` for addition, writing its blob if new.
    /// returns whether the staging area changed.
    pub fn add(&mut self, repo: &Repo, path: &Path) -> Result<bool> {
        let key = path.to_string_lossy().to_string();
        let blob = Blob::from_file(path)?;
        let blob_id = blob.id();

        if self.tracked.get(&key) == Some(&blob_id) {
            // matches what's already tracked: revert any pending staging
            let had_added = self.added.remove(&key).is_some();
            let had_removed = self.removed.remove(&key);
            return Ok(had_added || had_removed);
        }

        write_blob(repo, &blob)?;
        self.added.insert(key, blob_id);
        Ok(true)
    }

    /// stage `path` for removal. if staged for addition, unstage it
    /// instead. if tracked, mark removed and delete the working-tree file.
    /// returns whether the staging area changed.
    pub fn remove(&mut self, path: &Path) -> Result<bool> {
        let key = path.to_string_lossy().to_string();

        if self.added.remove(&key).is_some() {
            return Ok(true);
        }

        if self.tracked.contains_key(&key) {
            self.removed.insert(key);
            if path.exists() {
                std::fs::remove_file(path).with_path(path)?;
            }
            return Ok(true);
        }

        Ok(false)
    }

    /// drain staging into the new tracked map a commit should carry, and
    /// clear both sets.
    pub fn commit_drain(&mut self) -> BTreeMap<String, Id> {
        let new_tracked = self.effective();
        self.clear();
        new_tracked
    }

    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn test_repo() -> (tempfile::TempDir, Repo) {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        (dir, repo)
    }

    #[test]
    fn add_stages_new_file() {
        let (dir, repo) = test_repo();
        let file = dir.path().join("a.txt");
        fs::write(&file, "content").unwrap();

        let mut staging = StagingArea::load(&repo).unwrap();
        let changed = staging.add(&repo, &file).unwrap();

        assert!(changed);
        assert!(!staging.is_clean());
        assert_eq!(staging.added().len(), 1);
    }

    #[test]
    fn add_twice_is_idempotent() {
        let (dir, repo) = test_repo();
        let file = dir.path().join("a.txt");
        fs::write(&file, "content").unwrap();

        let mut staging = StagingArea::load(&repo).unwrap();
        staging.add(&repo, &file).unwrap();
        let before = staging.added().clone();
        staging.add(&repo, &file).unwrap();

        assert_eq!(staging.added(), &before);
    }

    #[test]
    fn remove_without_prior_state_is_not_a_change() {
        let (dir, repo) = test_repo();
        let file = dir.path().join("a.txt");
        fs::write(&file, "content").unwrap();

        let mut staging = StagingArea::load(&repo).unwrap();
        assert!(!staging.remove(&file).unwrap());
    }

    #[test]
    fn added_and_removed_never_overlap() {
        let (dir, repo) = test_repo();
        let file = dir.path().join("a.txt");
        fs::write(&file, "content").unwrap();

        let mut staging = StagingArea::load(&repo).unwrap();
        staging.add(&repo, &file).unwrap();
        staging.remove(&file).unwrap(); // was only staged, so this unstages it

        let added: std::collections::BTreeSet<_> = staging.added().keys().collect();
        let removed = staging.removed();
        assert!(added.is_disjoint(&removed.iter().collect()));
    }

    #[test]
    fn save_and_reload_round_trips_added_and_removed() {
        let (dir, repo) = test_repo();
        let file = dir.path().join("a.txt");
        fs::write(&file, "content").unwrap();

        let mut staging = StagingArea::load(&repo).unwrap();
        staging.add(&repo, &file).unwrap();
        staging.save(&repo).unwrap();

        let reloaded = StagingArea::load(&repo).unwrap();
        assert_eq!(reloaded.added(), staging.added());
    }
}
