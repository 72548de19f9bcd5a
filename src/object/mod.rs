//! the content-addressed object store: blobs and commits share one
//! `objects/<xx>/<rest>` namespace, distinguished by a one-byte type tag
//! prepended to each stored object so `resolve` can test "is this a
//! commit?" without a speculative typed deserialize.

pub mod blob;
pub mod commit;

use std::fs;
use std::io::Read;
use std::path::PathBuf;

pub use blob::{blob_exists, read_blob, write_blob};
pub use commit::{commit_exists, read_commit, write_commit};

use crate::error::{Error, IoResultExt, Result};
use crate::hash::Id;
use crate::repo::Repo;

pub(crate) const TAG_BLOB: u8 = 0;
pub(crate) const TAG_COMMIT: u8 = 1;

pub(crate) fn object_path(repo: &Repo, id: &Id) -> PathBuf {
    let (dir, file) = id.to_path_components();
    repo.objects_path().join(dir).join(file)
}

/// write a tagged, CBOR+zstd-encoded object if it isn't already present.
///
/// content addressing makes this idempotent: the id is a pure function of
/// the logical payload, so a second `put` of the same object is a no-op.
pub(crate) fn put(repo: &Repo, id: &Id, tag: u8, cbor_bytes: &[u8]) -> Result<()> {
    let path = object_path(repo, id);
    if path.exists() {
        return Ok(());
    }

    let dir = path.parent().expect("object path always has a shard parent");
    fs::create_dir_all(dir).with_path(dir)?;

    let compressed = zstd::encode_all(cbor_bytes, 3).with_path(&path)?;

    let tmp_path = repo.tmp_path().join(uuid::Uuid::new_v4().to_string());
    fs::create_dir_all(repo.tmp_path()).with_path(repo.tmp_path())?;
    {
        use std::io::Write;
        let mut tmp_file = fs::File::create(&tmp_path).with_path(&tmp_path)?;
        tmp_file.write_all(&[tag]).with_path(&tmp_path)?;
        tmp_file.write_all(&compressed).with_path(&tmp_path)?;
        tmp_file.sync_all().with_path(&tmp_path)?;
    }
    fs::rename(&tmp_path, &path).with_path(&path)?;

    tracing::debug!(id = %id, tag, "wrote object");
    Ok(())
}

/// read a tagged object back, checking its tag matches `expected_tag`.
pub(crate) fn get(repo: &Repo, id: &Id, expected_tag: u8) -> Result<Vec<u8>> {
    let path = object_path(repo, id);
    let raw = fs::read(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::ObjectNotFound(id.to_hex())
        } else {
            Error::Io {
                path: path.clone(),
                source: e,
            }
        }
    })?;

    if raw.is_empty() {
        return Err(Error::CorruptObject(id.to_hex()));
    }
    let (tag, compressed) = raw.split_first().unwrap();
    if *tag != expected_tag {
        return Err(Error::CorruptObject(id.to_hex()));
    }

    zstd::decode_all(compressed).with_path(&path)
}

/// expand a `>= 4`-hex-character prefix to the full id of the unique
/// commit-typed object it names.
pub fn resolve(repo: &Repo, prefix: &str) -> Result<Id> {
    if prefix.len() < 4 {
        return Err(Error::ShortId);
    }
    let prefix_lower = prefix.to_ascii_lowercase();

    let mut matches = Vec::new();
    let objects_dir = repo.objects_path();
    if objects_dir.is_dir() {
        for shard in fs::read_dir(&objects_dir).with_path(&objects_dir)? {
            let shard = shard.with_path(&objects_dir)?;
            let shard_path = shard.path();
            if !shard_path.is_dir() {
                continue;
            }
            let shard_name = shard.file_name().to_string_lossy().to_string();

            for entry in fs::read_dir(&shard_path).with_path(&shard_path)? {
                let entry = entry.with_path(&shard_path)?;
                let file_name = entry.file_name().to_string_lossy().to_string();
                let hex = format!("{}{}", shard_name, file_name);
                if !hex.starts_with(&prefix_lower) {
                    continue;
                }
                if object_tag(&entry.path())? == TAG_COMMIT {
                    matches.push(hex);
                }
            }
        }
    }

    match matches.len() {
        0 => Err(Error::NoSuchCommit),
        1 => Id::from_hex(&matches[0]),
        _ => Err(Error::AmbiguousId),
    }
}

/// every commit-typed object currently in the store, in no particular order.
pub fn all_commit_ids(repo: &Repo) -> Result<Vec<Id>> {
    let mut ids = Vec::new();
    let objects_dir = repo.objects_path();
    if !objects_dir.is_dir() {
        return Ok(ids);
    }
    for shard in fs::read_dir(&objects_dir).with_path(&objects_dir)? {
        let shard = shard.with_path(&objects_dir)?;
        let shard_path = shard.path();
        if !shard_path.is_dir() {
            continue;
        }
        let shard_name = shard.file_name().to_string_lossy().to_string();
        for entry in fs::read_dir(&shard_path).with_path(&shard_path)? {
            let entry = entry.with_path(&shard_path)?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            if object_tag(&entry.path())? == TAG_COMMIT {
                let hex = format!("{}{}", shard_name, file_name);
                ids.push(Id::from_hex(&hex)?);
            }
        }
    }
    Ok(ids)
}

fn object_tag(path: &PathBuf) -> Result<u8> {
    let mut file = fs::File::open(path).with_path(path)?;
    let mut tag = [0u8; 1];
    file.read_exact(&mut tag).with_path(path)?;
    Ok(tag[0])
}
