use super::{get, put, TAG_COMMIT};
use crate::error::Result;
use crate::hash::Id;
use crate::repo::Repo;
use crate::types::Commit;

/// write `commit` to the store, returning its id.
pub fn write_commit(repo: &Repo, commit: &Commit) -> Result<Id> {
    let id = commit.id();
    let mut cbor = Vec::new();
    ciborium::into_writer(commit, &mut cbor)?;
    put(repo, &id, TAG_COMMIT, &cbor)?;
    Ok(id)
}

/// read a commit back by id.
pub fn read_commit(repo: &Repo, id: &Id) -> Result<Commit> {
    let cbor = get(repo, id, TAG_COMMIT)?;
    let commit: Commit = ciborium::from_reader(&cbor[..])?;
    Ok(commit)
}

/// does an object with this id exist and decode as a commit?
pub fn commit_exists(repo: &Repo, id: &Id) -> bool {
    read_commit(repo, id).is_ok()
}
